//! HTTP client for shop requests using wreq for browser emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Why a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with anything other than 200.
    #[error("request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    /// DNS, connect, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: wreq::Error,
    },
}

/// Trait for listing/product page fetching - enables mocking for tests.
#[async_trait]
pub trait ShopSource: Send + Sync {
    /// Fetches the listing fragment starting at `offset`.
    async fn listing(&self, offset: u32) -> Result<String, FetchError>;

    /// Fetches a product detail page.
    async fn product(&self, url: &str) -> Result<String, FetchError>;
}

/// Shop HTTP client with browser impersonation.
pub struct ShopClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl ShopClient {
    /// Creates a new shop client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// URL of the listing fragment at `offset`.
    fn listing_url(&self, offset: u32) -> String {
        format!("{}?offset={}", self.base_url, offset)
    }

    /// Performs a GET request with the browser header set.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status.as_u16() != 200 {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl ShopSource for ShopClient {
    async fn listing(&self, offset: u32) -> Result<String, FetchError> {
        info!("Fetching listing at offset {}", offset);
        self.get(&self.listing_url(offset)).await
    }

    async fn product(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching product page: {}", url);
        self.get(url).await
    }
}
