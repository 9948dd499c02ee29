//! Request boundary.
//!
//! [`Scraper`] ties a [`Fetcher`] to the synchronous discovery and
//! extraction cores. Every outcome, including panics inside the core,
//! becomes a response value; nothing here returns `Err`.

use std::any::Any;
use std::time::Instant;

use tracing::{info, warn};

use crate::content::{self, PageSource};
use crate::error::{Error, Result};
use crate::fetch::{CrawlResult, FetchRequest, Fetcher};
use crate::links::{self, LinkFilter};
use crate::options::{CrawlOptions, DiscoverRequest, ScrapeRequest};
use crate::result::{DiscoverResponse, ScrapeResponse};

/// Message used when a failed discover fetch carries none.
pub const DISCOVER_FETCH_FAILED: &str = "Failed to fetch page";

/// Message used when a failed scrape fetch carries none.
pub const SCRAPE_FETCH_FAILED: &str = "Failed to scrape article";

/// Runs discover and scrape requests against a fetcher.
///
/// # Example
///
/// ```rust
/// use rs_crawlkit::{DiscoverRequest, Scraper, StaticFetcher};
///
/// let fetcher = StaticFetcher::new()
///     .with_page("https://news.example/", r#"<a href="/article/1">First story</a>"#);
/// let scraper = Scraper::new(fetcher);
///
/// let runtime = tokio::runtime::Runtime::new()?;
/// let response = runtime.block_on(scraper.discover(DiscoverRequest::new("https://news.example/")));
/// assert!(response.success);
/// assert_eq!(response.links[0].url, "https://news.example/article/1");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scraper<F> {
    fetcher: F,
}

impl<F: Fetcher> Scraper<F> {
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch a page and discover the links on it.
    #[tracing::instrument(skip_all, fields(url = %request.url))]
    pub async fn discover(&self, request: DiscoverRequest) -> DiscoverResponse {
        let prepared = request
            .validate()
            .and_then(|()| LinkFilter::new(&request.selectors, &request.filters));
        let filter = match prepared {
            Ok(filter) => filter,
            Err(err) => {
                warn!(error = %err, "discover request rejected");
                return DiscoverResponse::failed(&err, 0, false);
            }
        };

        info!(js_enabled = request.options.js_enabled, "discovering links");
        let js_rendered = self.js_rendered(&request.options);
        let started = Instant::now();
        let fetched = self
            .fetch_page(&request.url, &request.options, DISCOVER_FETCH_FAILED)
            .await;
        let crawl_duration_ms = elapsed_ms(started);

        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, crawl_duration_ms, "discover fetch failed");
                return DiscoverResponse::failed(&err, crawl_duration_ms, js_rendered);
            }
        };

        let DiscoverRequest { url, selectors, .. } = request;
        let outcome =
            run_blocking(move || links::discover_with(&page.html, &url, &selectors.css, &filter)).await;

        match outcome {
            Ok(discovery) => {
                info!(
                    links_found = discovery.links.len(),
                    total_links_on_page = discovery.total_links_on_page,
                    crawl_duration_ms,
                    "discovery complete"
                );
                DiscoverResponse::found(discovery, crawl_duration_ms, js_rendered)
            }
            Err(err) => {
                warn!(error = %err, "discovery failed");
                DiscoverResponse::failed(&err, crawl_duration_ms, js_rendered)
            }
        }
    }

    /// Fetch a page and extract its content.
    ///
    /// Content shorter than `minContentLength` yields `success = false`
    /// while still returning the extracted data.
    #[tracing::instrument(skip_all, fields(url = %request.url))]
    pub async fn scrape(&self, request: ScrapeRequest) -> ScrapeResponse {
        if let Err(err) = request.validate() {
            warn!(error = %err, "scrape request rejected");
            return ScrapeResponse::failed(&err, 0, false);
        }

        info!(format = request.extract.content.format.as_str(), "scraping page");
        let js_rendered = self.js_rendered(&request.options);
        let started = Instant::now();
        let fetched = self
            .fetch_page(&request.url, &request.options, SCRAPE_FETCH_FAILED)
            .await;
        let crawl_duration_ms = elapsed_ms(started);

        let page = match fetched {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, crawl_duration_ms, "scrape fetch failed");
                return ScrapeResponse::failed(&err, crawl_duration_ms, js_rendered);
            }
        };

        let ScrapeRequest {
            fallback_title,
            extract,
            processing,
            ..
        } = request;

        let outcome = run_blocking(move || {
            let source = PageSource {
                html: &page.html,
                markdown: &page.markdown,
            };
            let extraction = content::extract_with(source, &extract, &processing, fallback_title.as_deref());
            let verdict = content::processing::validate(&extraction.data.content, &processing);
            (extraction, verdict)
        })
        .await;

        match outcome {
            Ok((extraction, Ok(()))) => {
                info!(
                    method = %extraction.method,
                    content_length = extraction.data.content_length,
                    crawl_duration_ms,
                    "scrape complete"
                );
                ScrapeResponse::extracted(extraction, crawl_duration_ms, js_rendered)
            }
            Ok((extraction, Err(err))) => {
                warn!(error = %err, method = %extraction.method, "scraped content rejected");
                ScrapeResponse::rejected(extraction, &err, crawl_duration_ms, js_rendered)
            }
            Err(err) => {
                warn!(error = %err, "scrape failed");
                ScrapeResponse::failed(&err, crawl_duration_ms, js_rendered)
            }
        }
    }

    fn js_rendered(&self, options: &CrawlOptions) -> bool {
        options.js_enabled && self.fetcher.renders_javascript()
    }

    async fn fetch_page(&self, url: &str, options: &CrawlOptions, default_message: &str) -> Result<CrawlResult> {
        self.fetcher
            .fetch(&FetchRequest::new(url, options))
            .await?
            .into_success(default_message)
    }
}

/// Run a synchronous core on the blocking pool.
///
/// A panic inside `core` is reported as [`Error::Unexpected`].
async fn run_blocking<T, C>(core: C) -> Result<T>
where
    C: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(core).await.map_err(|err| {
        if err.is_panic() {
            Error::Unexpected(panic_message(&*err.into_panic()))
        } else {
            Error::Unexpected(err.to_string())
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "extraction panicked".to_string())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
