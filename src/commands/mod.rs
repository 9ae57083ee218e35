//! CLI command implementations.

pub mod scrape;

pub use scrape::{Mode, ScrapeCommand};
