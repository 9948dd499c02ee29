//! Fetch collaborator interface.
//!
//! Browser automation lives outside this crate. A [`Fetcher`] takes a URL
//! plus crawl options and hands back a [`CrawlResult`]: raw markup, a
//! Markdown rendition of the whole page, and a success flag. Two
//! implementations are bundled:
//!
//! - [`StaticFetcher`] serves pre-registered pages from memory.
//! - [`HttpFetcher`] (feature `http`) performs a plain GET without
//!   JavaScript execution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::markdown;
use crate::options::CrawlOptions;

/// Outcome of fetching one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub success: bool,
    pub html: String,
    pub markdown: String,
    pub error_message: Option<String>,
}

impl CrawlResult {
    /// A successful fetch.
    #[must_use]
    pub fn ok(html: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            success: true,
            html: html.into(),
            markdown: markdown.into(),
            error_message: None,
        }
    }

    /// A failed fetch carrying the collaborator's message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Turn a reported failure into [`Error::FetchFailed`].
    ///
    /// The collaborator's message is kept unchanged; `default_message` is
    /// used only when it supplied none.
    pub fn into_success(self, default_message: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let message = self
            .error_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());
        Err(Error::FetchFailed(message))
    }
}

/// Parameters for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub js_enabled: bool,
    pub anti_bot_bypass: bool,
    pub timeout: Duration,
}

impl FetchRequest {
    /// Build from a request URL and its crawl options.
    #[must_use]
    pub fn new(url: &str, options: &CrawlOptions) -> Self {
        Self {
            url: url.to_string(),
            js_enabled: options.js_enabled,
            anti_bot_bypass: options.anti_bot_bypass,
            timeout: Duration::from_millis(options.timeout_ms),
        }
    }
}

/// Something that can fetch a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one page.
    ///
    /// Report page-level failures (bad status, blocked, timeout inside a
    /// browser) as `Ok(CrawlResult::failed(..))`; return `Err` only when
    /// the fetch itself could not be carried out.
    async fn fetch(&self, request: &FetchRequest) -> Result<CrawlResult>;

    /// Whether this fetcher executes JavaScript when asked to.
    fn renders_javascript(&self) -> bool {
        true
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, request: &FetchRequest) -> Result<CrawlResult> {
        (**self).fetch(request).await
    }

    fn renders_javascript(&self) -> bool {
        (**self).renders_javascript()
    }
}

// === In-memory fetcher ===

/// Serves pages registered up front, keyed by exact URL.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, CrawlResult>,
    renders_javascript: bool,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register markup for a URL; the Markdown rendition is derived from it.
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let rendered = markdown::render(&html);
        self.with_result(url, CrawlResult::ok(html, rendered))
    }

    /// Register an exact fetch outcome for a URL.
    #[must_use]
    pub fn with_result(mut self, url: impl Into<String>, result: CrawlResult) -> Self {
        self.pages.insert(url.into(), result);
        self
    }

    /// Report pages as JavaScript-rendered.
    #[must_use]
    pub fn rendering_javascript(mut self, renders: bool) -> Self {
        self.renders_javascript = renders;
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<CrawlResult> {
        Ok(self
            .pages
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| CrawlResult::failed(format!("no page registered for {}", request.url))))
    }

    fn renders_javascript(&self) -> bool {
        self.renders_javascript
    }
}

// === HTTP fetcher ===

/// Settings for [`HttpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpFetcherConfig {
    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Bodies larger than this are reported as a failed fetch.
    ///
    /// Default: `10485760` (10 MiB)
    pub max_body_bytes: usize,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("rs-crawlkit/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Plain HTTP GET fetcher.
///
/// Does not execute JavaScript or apply anti-bot measures; those request
/// flags are accepted and ignored.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: HttpFetcherConfig,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Build the underlying HTTP client.
    ///
    /// # Errors
    /// Returns [`Error::Unexpected`] if the TLS backend cannot be initialized.
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<CrawlResult> {
        if request.js_enabled || request.anti_bot_bypass {
            tracing::debug!(url = %request.url, "HTTP fetcher ignores JavaScript and anti-bot flags");
        }

        let mut response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| Error::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(CrawlResult::failed(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let mut body = match LimitedBody::start(response.content_length(), self.config.max_body_bytes) {
            Ok(body) => body,
            Err(message) => return Ok(CrawlResult::failed(message)),
        };

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::FetchFailed(e.to_string()))?
        {
            if let Err(message) = body.push(&chunk) {
                return Ok(CrawlResult::failed(message));
            }
        }

        let body = body.into_bytes();
        let html = crate::encoding::transcode_to_utf8(&body, content_type.as_deref());
        let rendered = markdown::render(&html);
        Ok(CrawlResult::ok(html, rendered))
    }

    fn renders_javascript(&self) -> bool {
        false
    }
}

/// Response body collected under a size limit.
#[cfg(feature = "http")]
#[derive(Debug)]
struct LimitedBody {
    bytes: Vec<u8>,
    limit: usize,
}

#[cfg(feature = "http")]
impl LimitedBody {
    /// Start collecting; a declared length over the limit fails before any read.
    fn start(declared: Option<u64>, limit: usize) -> std::result::Result<Self, String> {
        if let Some(declared) = declared {
            if declared > u64::try_from(limit).unwrap_or(u64::MAX) {
                return Err(format!(
                    "response body of {declared} bytes exceeds limit of {limit} bytes"
                ));
            }
        }

        let capacity = declared
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or_default();
        Ok(Self {
            bytes: Vec::with_capacity(capacity),
            limit,
        })
    }

    /// Append a chunk, failing as soon as the running total passes the limit.
    fn push(&mut self, chunk: &[u8]) -> std::result::Result<(), String> {
        if self.bytes.len() + chunk.len() > self.limit {
            return Err(format!(
                "response body exceeds limit of {} bytes",
                self.limit
            ));
        }
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
