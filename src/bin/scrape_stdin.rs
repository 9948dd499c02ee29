//! Reads a scrape request as JSON from stdin and prints the response
//! as JSON to stdout. Logs go to stderr; set `RUST_LOG` to adjust.

use anyhow::{Context, Result};
use rs_crawlkit::{HttpFetcher, HttpFetcherConfig, ScrapeRequest, Scraper};
use tokio::io::{self, AsyncReadExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rs_crawlkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read request from stdin")?;

    let request: ScrapeRequest =
        serde_json::from_str(&input).context("stdin is not a valid scrape request")?;

    let scraper = Scraper::new(HttpFetcher::new(HttpFetcherConfig::default())?);
    let response = scraper.scrape(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
