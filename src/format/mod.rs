//! Console formatting for scraped records (table, JSON).

use crate::config::OutputFormat;
use crate::shop::Tabular;
use serde::Serialize;

/// Widest a table cell may grow before it is cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 48;

/// Formats records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of records.
    pub fn format_records<T: Tabular + Serialize>(&self, records: &[T]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
        }
    }

    fn json_records<T: Serialize>(&self, records: &[T]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_records<T: Tabular>(&self, records: &[T]) -> String {
        let rows: Vec<Vec<String>> =
            records.iter().map(|r| r.cells().into_iter().map(|c| truncate(&c)).collect()).collect();

        // Column widths from header and cells
        let widths: Vec<usize> = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::new();

        let header: Vec<String> =
            T::COLUMNS.iter().zip(&widths).map(|(h, w)| format!("{:<w$}", h, w = w)).collect();
        lines.push(header.join("  ").trim_end().to_string());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(rule.join("  "));

        for row in &rows {
            let cells: Vec<String> =
                row.iter().zip(&widths).map(|(c, w)| format!("{:<w$}", c, w = w)).collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", records.len()));

        lines.join("\n")
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_WIDTH {
        let head: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        cell.to_string()
    }
}
