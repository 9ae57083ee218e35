//! Shop-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{FetchError, ShopClient, ShopSource};
pub use models::{EnrichedProduct, Price, ProductDetail, ProductSummary, Tabular, ABSENT};
pub use parser::Parser;
