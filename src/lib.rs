//! # rs-crawlkit
//!
//! Selector-driven link discovery and content scraping over fetched pages.
//!
//! Given a page fetched by an external collaborator (raw markup plus a
//! whole-page Markdown rendition), this library finds and filters the
//! links on it, or pulls out a title, body content, meta tags and custom
//! fields according to caller-supplied CSS selectors.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_crawlkit::{discover_links, LinkFilters, LinkSelectors};
//!
//! let html = r#"<nav><a href="/article/42">Big Story</a> <a href="/about">About</a></nav>"#;
//! let selectors = LinkSelectors {
//!     url_patterns: vec!["/article/".to_string()],
//!     ..LinkSelectors::default()
//! };
//!
//! let found = discover_links(html, "https://news.example/", &selectors, &LinkFilters::default())?;
//! assert_eq!(found.links.len(), 1);
//! assert_eq!(found.links[0].url, "https://news.example/article/42");
//! # Ok::<(), rs_crawlkit::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Link Discovery**: CSS selection, URL resolution, de-duplication,
//!   pattern and same-host filtering with a hard cap
//! - **Content Extraction**: title fallback chain, first-match content
//!   selectors, element pruning, html/markdown/text output
//! - **Normalization**: whitespace collapsing, truncation and a minimum
//!   length gate
//! - **Request Boundary**: [`Scraper`] turns every failure into a
//!   structured response
//!
//! The `http` feature (on by default) adds [`HttpFetcher`], a plain GET
//! fetcher without JavaScript execution.

mod error;
mod options;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Shared regex patterns and text helpers.
pub mod patterns;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Link selection and filtering.
pub mod links;

/// Title, body, metadata and custom-field extraction.
pub mod content;

/// Fetch collaborator interface and bundled fetchers.
pub mod fetch;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Markdown rendering.
pub mod markdown;

/// Request boundary tying fetchers to the extraction cores.
pub mod service;

// Public API - re-exports
pub use error::{Error, ErrorKind, Result};
pub use options::{
    ContentExtraction, ContentFormat, CrawlOptions, CustomField, DiscoverRequest, ExtractConfig,
    LinkFilters, LinkSelectors, ProcessingConfig, ScrapeRequest, TitleExtraction,
    MAX_CONTENT_LENGTH_FLOOR, MAX_LINKS_LIMIT,
};
pub use result::{
    DiscoverResponse, DiscoveredLink, Extraction, LinkDiscovery, ScrapeResponse, ScrapedData,
};

pub use content::extract as scrape_document;
pub use content::PageSource;
pub use links::discover as discover_links;
pub use links::LinkFilter;

pub use fetch::{CrawlResult, FetchRequest, Fetcher, HttpFetcherConfig, StaticFetcher};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;

pub use service::Scraper;
