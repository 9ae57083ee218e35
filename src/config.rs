//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::shop::parser::DEFAULT_IMAGE_PREFIX;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Listing endpoint of the demo shop.
pub const DEFAULT_BASE_URL: &str = "https://www.scrapingcourse.com/ajax/products";

/// Desktop Chrome on macOS.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listing endpoint; pages are requested as `{base_url}?offset={n}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Images outside this prefix are treated as placeholders
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,

    /// Offset of the first fetched page (the first items are already on the landing page)
    #[serde(default = "default_start_offset")]
    pub start_offset: u32,

    /// Offset increment between pages
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Delay between listing pages in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many of the highest priced products to enrich
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// CSV output path; each mode has its own default
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Console output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_image_prefix() -> String {
    DEFAULT_IMAGE_PREFIX.to_string()
}

fn default_start_offset() -> u32 {
    10
}

fn default_page_size() -> u32 {
    20
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            image_prefix: default_image_prefix(),
            start_offset: default_start_offset(),
            page_size: default_page_size(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            top_n: default_top_n(),
            proxy: None,
            output: None,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("shop-scraper.toml");
        if local_config.exists() {
            debug!("Found shop-scraper.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shop-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("SHOP_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(proxy) = std::env::var("SHOP_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("SHOP_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }
}

/// Console output format for scraped records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
