//! shop-scraper - Paginated product listing scraper with CSV export

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_scraper::commands::{Mode, ScrapeCommand};
use shop_scraper::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shop-scraper",
    version,
    about = "Scrape the scrapingcourse.com demo shop listing to CSV",
    long_about = "Walks the paginated product listing and exports every product, or the highest priced ones enriched with description and SKU."
)]
struct Cli {
    /// CSV output path (defaults depend on the command)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Listing endpoint, requested as <URL>?offset=N
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SHOP_PROXY")]
    proxy: Option<String>,

    /// Delay between listing pages in milliseconds
    #[arg(long, global = true, env = "SHOP_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every listed product
    #[command(alias = "a")]
    All,

    /// Export the highest priced products with description and SKU
    #[command(alias = "t")]
    Top {
        /// Number of products to enrich
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

/// `--verbose` forces DEBUG. Otherwise a valid `RUST_LOG` wins over the INFO default.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(Level::DEBUG.to_string());
    }

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(Level::INFO.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = log_filter(cli.verbose, std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(output) = cli.output {
        config.output = Some(output);
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let mode = match cli.command {
        Some(Commands::All) => Mode::All,
        Some(Commands::Top { count }) => Mode::Top(count.unwrap_or(config.top_n)),
        None => Mode::Top(config.top_n),
    };

    let cmd = ScrapeCommand::new(config, mode);
    let output = cmd.execute().await?;
    println!("{}", output);

    Ok(())
}
