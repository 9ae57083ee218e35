//! shop-scraper - Paginated product listing scraper with CSV export
//!
//! Walks the scrapingcourse.com demo shop listing, optionally enriches the
//! highest priced products from their detail pages, and writes the result
//! as CSV.

pub mod commands;
pub mod config;
pub mod crawl;
pub mod export;
pub mod format;
pub mod rank;
pub mod shop;

pub use commands::{Mode, ScrapeCommand};
pub use config::Config;
pub use shop::{EnrichedProduct, Price, ProductDetail, ProductSummary};
