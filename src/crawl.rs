//! Pagination driver: walks the listing offsets until the shop runs dry.

use crate::config::Config;
use crate::shop::{Parser, ProductSummary, ShopSource};
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why the crawl stopped. Both variants keep everything collected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlEnd {
    /// A listing page came back without products.
    Exhausted,
    /// A listing page could not be fetched.
    FetchFailed,
}

/// Result of a full pagination run.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Products in page order, then in-page order
    pub products: Vec<ProductSummary>,
    /// Number of non-empty pages accumulated
    pub pages: usize,
    /// Offset of the last page requested
    pub final_offset: u32,
    pub end: CrawlEnd,
}

enum State {
    Fetching,
    Parsing(String),
    Accumulating(Vec<ProductSummary>),
    Done(CrawlEnd),
}

/// Fixed delay between listing pages, with optional jitter.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    delay_ms: u64,
    jitter_ms: u64,
}

impl Throttle {
    pub fn new(delay_ms: u64, jitter_ms: u64) -> Self {
        Self { delay_ms, jitter_ms }
    }

    /// Sleeps for the configured delay.
    pub async fn wait(&self) {
        if self.delay_ms == 0 && self.jitter_ms == 0 {
            return;
        }

        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..=self.jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

/// Drives listing fetches from `start_offset` in `page_size` steps.
pub struct Paginator<'a, S: ShopSource> {
    source: &'a S,
    parser: &'a Parser,
    start_offset: u32,
    page_size: u32,
    throttle: Throttle,
}

impl<'a, S: ShopSource> Paginator<'a, S> {
    pub fn new(source: &'a S, parser: &'a Parser, config: &Config) -> Self {
        Self {
            source,
            parser,
            start_offset: config.start_offset,
            page_size: config.page_size,
            throttle: Throttle::new(config.delay_ms, config.delay_jitter_ms),
        }
    }

    /// Runs until an empty page or a failed fetch.
    pub async fn run(&self) -> CrawlReport {
        let mut offset = self.start_offset;
        let mut products: Vec<ProductSummary> = Vec::new();
        let mut pages = 0;
        let mut state = State::Fetching;

        loop {
            state = match state {
                State::Fetching => match self.source.listing(offset).await {
                    Ok(html) => State::Parsing(html),
                    Err(e) => {
                        warn!("Failed to retrieve page, stopping the scraper: {}", e);
                        State::Done(CrawlEnd::FetchFailed)
                    }
                },

                State::Parsing(html) => {
                    let page = self.parser.parse_listing(&html);
                    if page.is_empty() {
                        info!("No more products found at offset {}", offset);
                        State::Done(CrawlEnd::Exhausted)
                    } else {
                        State::Accumulating(page)
                    }
                }

                State::Accumulating(page) => {
                    pages += 1;
                    products.extend(page);
                    info!("Scraped {} products.", products.len());

                    match offset.checked_add(self.page_size) {
                        Some(next) => {
                            offset = next;
                            self.throttle.wait().await;
                            State::Fetching
                        }
                        None => {
                            warn!("Offset past {} overflows, stopping the scraper", offset);
                            State::Done(CrawlEnd::Exhausted)
                        }
                    }
                }

                State::Done(end) => {
                    return CrawlReport { products, pages, final_offset: offset, end };
                }
            };
        }
    }
}
