//! CSV export of scraped records.

use crate::shop::Tabular;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes records as comma-separated rows under a header.
pub struct CsvExporter;

impl CsvExporter {
    /// Writes `records` to `path`, replacing any existing file. An empty
    /// slice still produces the header row.
    pub fn write_file<T: Tabular>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        Self::write(file, records)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        info!("Wrote {} rows to {}", records.len(), path.display());
        Ok(())
    }

    /// Writes `records` to any writer.
    pub fn write<T: Tabular, W: Write>(writer: W, records: &[T]) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

        wtr.write_record(T::COLUMNS)?;
        for record in records {
            wtr.write_record(record.cells())?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shop::{EnrichedProduct, Price, ProductDetail, ProductSummary};
    use tempfile::tempdir;

    fn to_string<T: Tabular>(records: &[T]) -> String {
        let mut buf = Vec::new();
        CsvExporter::write(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn make_summary() -> ProductSummary {
        ProductSummary {
            product_url: Some("https://shop.test/hoodie".to_string()),
            image_url: None,
            name: Some("Hoodie, Blue".to_string()),
            price: Price::new(Some("$1,234.50".to_string()), 1234.5),
        }
    }

    #[test]
    fn test_header_only_for_empty() {
        let out = to_string::<ProductSummary>(&[]);
        assert_eq!(out, "product_url,image_url,name,price\n");
    }

    #[test]
    fn test_summary_rows_quote_commas() {
        let out = to_string(&[make_summary()]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "product_url,image_url,name,price");
        assert_eq!(lines[1], r#"https://shop.test/hoodie,N/A,"Hoodie, Blue","$1,234.50""#);
    }

    #[test]
    fn test_enriched_rows() {
        let enriched = EnrichedProduct::new(
            make_summary(),
            ProductDetail { description: Some("Soft \"fleece\".".to_string()), sku: None },
        );
        let out = to_string(&[enriched]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "product_url,image_url,name,price,description,sku");
        assert_eq!(
            lines[1],
            r#"https://shop.test/hoodie,N/A,"Hoodie, Blue",1234.5,"Soft ""fleece"".",N/A"#
        );
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped_products.csv");
        std::fs::write(&path, "stale contents that are longer than the new file\n").unwrap();

        CsvExporter::write_file::<ProductSummary>(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "product_url,image_url,name,price\n");
    }

    #[test]
    fn test_write_file_bad_directory() {
        let err = CsvExporter::write_file::<ProductSummary>("/nonexistent/dir/out.csv", &[])
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
