//! Data models for listing entries, detail pages, and enriched records.

use serde::{Deserialize, Serialize};

/// Placeholder written wherever an expected field could not be extracted.
pub const ABSENT: &str = "N/A";

/// Returns the field value or the absent-marker.
pub fn or_absent(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(ABSENT)
}

/// Record types that export to a fixed set of columns.
pub trait Tabular {
    /// Column names, in extraction order.
    const COLUMNS: &'static [&'static str];

    /// Cell values, one per column. Absent fields render as [`ABSENT`].
    fn cells(&self) -> Vec<String>;
}

/// Listing price: the raw text as shown, and its numeric value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Trimmed price text (e.g. "$1,234.50")
    pub text: Option<String>,
    /// Parsed amount; 0.0 when the text is absent or unparseable
    pub amount: f64,
}

impl Price {
    /// Creates a price from its text and already parsed amount.
    pub fn new(text: Option<String>, amount: f64) -> Self {
        Self { text, amount }
    }

    /// Formats the amount the way tabular exports expect (`999.0`, `1234.5`).
    pub fn amount_display(&self) -> String {
        if self.amount.fract() == 0.0 {
            format!("{:.1}", self.amount)
        } else {
            self.amount.to_string()
        }
    }
}

/// One product as it appears on a listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Link to the product's detail page
    pub product_url: Option<String>,
    /// Product image hosted on the shop's asset host
    pub image_url: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Listing price
    pub price: Price,
}

impl Tabular for ProductSummary {
    const COLUMNS: &'static [&'static str] = &["product_url", "image_url", "name", "price"];

    fn cells(&self) -> Vec<String> {
        vec![
            or_absent(&self.product_url).to_string(),
            or_absent(&self.image_url).to_string(),
            or_absent(&self.name).to_string(),
            or_absent(&self.price.text).to_string(),
        ]
    }
}

/// Long-form fields only present on a product's detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    /// Description paragraphs joined with single spaces
    pub description: Option<String>,
    /// Stock keeping unit
    pub sku: Option<String>,
}

impl ProductDetail {
    /// Detail with both fields absent, used when the page can't be fetched.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// A listing entry merged with the fields from its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub summary: ProductSummary,
    #[serde(flatten)]
    pub detail: ProductDetail,
}

impl EnrichedProduct {
    /// Merges a summary with its detail fields.
    pub fn new(summary: ProductSummary, detail: ProductDetail) -> Self {
        Self { summary, detail }
    }
}

impl Tabular for EnrichedProduct {
    const COLUMNS: &'static [&'static str] =
        &["product_url", "image_url", "name", "price", "description", "sku"];

    fn cells(&self) -> Vec<String> {
        vec![
            or_absent(&self.summary.product_url).to_string(),
            or_absent(&self.summary.image_url).to_string(),
            or_absent(&self.summary.name).to_string(),
            self.summary.price.amount_display(),
            or_absent(&self.detail.description).to_string(),
            or_absent(&self.detail.sku).to_string(),
        ]
    }
}
