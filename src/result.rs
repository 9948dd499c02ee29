//! Result types for discovery and scrape output.
//!
//! These are request-scoped value objects: built once while handling a
//! request, serialized as camelCase JSON, never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::options::ContentFormat;

/// A link that survived selection and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredLink {
    /// Absolute URL; unique within one response.
    pub url: String,

    /// Visible link text, whitespace collapsed.
    pub text: String,

    /// Text of the enclosing element, at most 200 characters.
    pub context: String,

    /// Auxiliary attributes: `selector`, `title`, `rel` when present.
    pub metadata: BTreeMap<String, String>,
}

/// Output of link discovery over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDiscovery {
    /// Accepted links in selection order.
    pub links: Vec<DiscoveredLink>,

    /// Unique candidate links the selector stage produced before filtering.
    pub total_links_on_page: usize,
}

/// Content extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedData {
    pub title: Option<String>,

    /// Normalized content, possibly ending in the truncation marker.
    pub content: String,

    /// Character count of `content`, marker included.
    pub content_length: usize,

    pub format: ContentFormat,

    /// Requested meta tags that were present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,

    /// Custom fields whose selector matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BTreeMap<String, String>>,
}

impl ScrapedData {
    /// Build from normalized content, deriving `content_length` from it.
    #[must_use]
    pub fn new(title: Option<String>, content: String, format: ContentFormat) -> Self {
        let content_length = content.chars().count();
        Self {
            title,
            content,
            content_length,
            format,
            metadata: None,
            custom_fields: None,
        }
    }
}

/// Outcome of the synchronous extraction core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub data: ScrapedData,

    /// How the content was found, e.g. `selector:article` or `fallback:markdown`.
    pub method: String,
}

/// Response of the `discover` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub success: bool,
    pub links: Vec<DiscoveredLink>,
    pub links_found: usize,
    pub total_links_on_page: usize,
    pub crawl_duration_ms: u64,
    pub js_rendered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl DiscoverResponse {
    /// Successful response carrying the discovered links.
    #[must_use]
    pub fn found(discovery: LinkDiscovery, crawl_duration_ms: u64, js_rendered: bool) -> Self {
        Self {
            success: true,
            links_found: discovery.links.len(),
            total_links_on_page: discovery.total_links_on_page,
            links: discovery.links,
            crawl_duration_ms,
            js_rendered,
            error: None,
            error_kind: None,
        }
    }

    /// Failure response for any error kind.
    #[must_use]
    pub fn failed(err: &Error, crawl_duration_ms: u64, js_rendered: bool) -> Self {
        Self {
            success: false,
            crawl_duration_ms,
            js_rendered,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            ..Self::default()
        }
    }
}

/// Response of the `scrape` operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub success: bool,
    pub data: Option<ScrapedData>,
    pub crawl_duration_ms: u64,
    pub js_rendered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ScrapeResponse {
    /// Successful response.
    #[must_use]
    pub fn extracted(extraction: Extraction, crawl_duration_ms: u64, js_rendered: bool) -> Self {
        Self {
            success: true,
            data: Some(extraction.data),
            crawl_duration_ms,
            js_rendered,
            extraction_method: Some(extraction.method),
            error: None,
            error_kind: None,
        }
    }

    /// Content was extracted but rejected; the data is kept for inspection.
    #[must_use]
    pub fn rejected(
        extraction: Extraction,
        err: &Error,
        crawl_duration_ms: u64,
        js_rendered: bool,
    ) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            ..Self::extracted(extraction, crawl_duration_ms, js_rendered)
        }
    }

    /// Failure response without data.
    #[must_use]
    pub fn failed(err: &Error, crawl_duration_ms: u64, js_rendered: bool) -> Self {
        Self {
            success: false,
            crawl_duration_ms,
            js_rendered,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
            ..Self::default()
        }
    }
}
