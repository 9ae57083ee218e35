//! Scrape command: crawl the listing, optionally rank and enrich, export.

use crate::config::Config;
use crate::crawl::{CrawlEnd, Paginator};
use crate::export::CsvExporter;
use crate::format::Formatter;
use crate::rank;
use crate::shop::{Parser, ShopClient, ShopSource};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every listed product with its raw price text.
    All,
    /// The `n` highest priced products, enriched from their detail pages.
    Top(usize),
}

impl Mode {
    /// Default CSV path for this mode.
    pub fn default_output(&self) -> PathBuf {
        match self {
            Mode::All => PathBuf::from("scraped_products.csv"),
            Mode::Top(n) => PathBuf::from(format!("top_{}_highest_priced_products.csv", n)),
        }
    }
}

/// Runs the scrape pipeline.
pub struct ScrapeCommand {
    config: Config,
    mode: Mode,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config, mode: Mode) -> Self {
        Self { config, mode }
    }

    /// Path the CSV is written to.
    pub fn output_path(&self) -> PathBuf {
        self.config.output.clone().unwrap_or_else(|| self.mode.default_output())
    }

    /// Executes the scrape and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = ShopClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Executes the scrape with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl ShopSource) -> Result<String> {
        let parser = Parser::new(self.config.image_prefix.as_str());

        let report = Paginator::new(client, &parser, &self.config).run().await;
        if report.end == CrawlEnd::FetchFailed {
            warn!(
                "Listing ended early at offset {}; exporting {} products collected so far",
                report.final_offset,
                report.products.len()
            );
        }

        let path = self.output_path();
        let formatter = Formatter::new(self.config.format);

        let (body, saved) = match self.mode {
            Mode::All => {
                CsvExporter::write_file(&path, &report.products)?;
                (formatter.format_records(&report.products), "Product data")
            }
            Mode::Top(n) => {
                let top = rank::top_by_price(report.products, n);
                info!("Enriching the {} highest priced products", top.len());
                let enriched = rank::enrich(client, &parser, top).await;

                CsvExporter::write_file(&path, &enriched)?;
                (formatter.format_records(&enriched), "Top products data")
            }
        };

        Ok(format!("{}\n\n{} saved to {}", body, saved, path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::shop::FetchError;
    use async_trait::async_trait;
    use tempfile::tempdir;

    /// Serves listing pages in order, then an empty page.
    struct MockShop {
        pages: Vec<String>,
    }

    #[async_trait]
    impl ShopSource for MockShop {
        async fn listing(&self, offset: u32) -> Result<String, FetchError> {
            let idx = ((offset - 10) / 20) as usize;
            Ok(self.pages.get(idx).cloned().unwrap_or_default())
        }

        async fn product(&self, url: &str) -> Result<String, FetchError> {
            let slug = url.rsplit('/').next().unwrap_or_default();
            Ok(format!(r#"<span class="sku">SKU-{}</span>"#, slug))
        }
    }

    fn make_listing_html(products: &[(&str, &str)]) -> String {
        products
            .iter()
            .map(|(slug, price)| {
                format!(
                    r#"<div class="product-item flex flex-col items-center rounded-lg">
                        <a href="https://shop.test/{0}"></a>
                        <span class="product-name">{0}</span>
                        <span class="product-price">{1}</span>
                    </div>"#,
                    slug, price
                )
            })
            .collect()
    }

    fn make_test_config(output: PathBuf) -> Config {
        Config { delay_ms: 0, output: Some(output), ..Config::default() }
    }

    #[test]
    fn test_default_output() {
        assert_eq!(Mode::All.default_output(), PathBuf::from("scraped_products.csv"));
        assert_eq!(
            Mode::Top(5).default_output(),
            PathBuf::from("top_5_highest_priced_products.csv")
        );
    }

    #[test]
    fn test_output_path_override() {
        let cmd = ScrapeCommand::new(Config::default(), Mode::All);
        assert_eq!(cmd.output_path(), PathBuf::from("scraped_products.csv"));

        let config = Config { output: Some(PathBuf::from("custom.csv")), ..Config::default() };
        let cmd = ScrapeCommand::new(config, Mode::Top(5));
        assert_eq!(cmd.output_path(), PathBuf::from("custom.csv"));
    }

    #[tokio::test]
    async fn test_all_mode_exports_raw_prices() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.csv");
        let client = MockShop {
            pages: vec![make_listing_html(&[("a", "$1,000.00"), ("b", "$5")])],
        };

        let cmd = ScrapeCommand::new(make_test_config(path.clone()), Mode::All);
        let output = cmd.execute_with_client(&client).await.unwrap();

        assert!(output.contains("Product data saved to"));
        let csv = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#"https://shop.test/a,N/A,a,"$1,000.00""#);
        assert_eq!(lines[2], "https://shop.test/b,N/A,b,$5");
    }

    #[tokio::test]
    async fn test_top_mode_ranks_and_enriches() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.csv");
        let client = MockShop {
            pages: vec![
                make_listing_html(&[("a", "$10"), ("b", "$999"), ("c", "$5")]),
                make_listing_html(&[("d", "$999.01"), ("e", "$3"), ("f", "$1")]),
            ],
        };

        let cmd = ScrapeCommand::new(make_test_config(path.clone()), Mode::Top(5));
        cmd.execute_with_client(&client).await.unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "product_url,image_url,name,price,description,sku");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "https://shop.test/d,N/A,d,999.01,N/A,SKU-d");
        assert_eq!(lines[2], "https://shop.test/b,N/A,b,999.0,N/A,SKU-b");
        assert_eq!(lines[5], "https://shop.test/e,N/A,e,3.0,N/A,SKU-e");
    }

    #[tokio::test]
    async fn test_json_format_output() {
        let dir = tempdir().unwrap();
        let mut config = make_test_config(dir.path().join("out.csv"));
        config.format = OutputFormat::Json;
        let client = MockShop { pages: vec![make_listing_html(&[("a", "$1")])] };

        let output = ScrapeCommand::new(config, Mode::All).execute_with_client(&client).await.unwrap();
        assert!(output.starts_with('['));
    }

    #[tokio::test]
    async fn test_empty_shop_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.csv");
        let client = MockShop { pages: Vec::new() };

        let cmd = ScrapeCommand::new(make_test_config(path.clone()), Mode::Top(5));
        let output = cmd.execute_with_client(&client).await.unwrap();

        assert!(output.contains("No products found."));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "product_url,image_url,name,price,description,sku\n"
        );
    }
}
