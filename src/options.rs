//! Request configuration for discovery and scraping.
//!
//! Every type here deserializes from camelCase JSON and fills absent fields
//! with its documented default, so an omitted block behaves exactly like
//! `Default::default()`. Call `validate()` before fetching: malformed
//! selectors, patterns and out-of-range numbers are rejected up front.
//!
//! # Example
//!
//! ```rust
//! use rs_crawlkit::{LinkFilters, ProcessingConfig};
//!
//! let filters = LinkFilters {
//!     max_links: 10,
//!     include_external: true,
//!     ..LinkFilters::default()
//! };
//! assert_eq!(filters.min_text_length, 0);
//!
//! let processing: ProcessingConfig = serde_json::from_str(r#"{"stripHtml": true}"#)?;
//! assert_eq!(processing.min_content_length, 200);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::dom;
use crate::error::{Error, Result};
use crate::url_utils;

/// Upper bound for [`LinkFilters::max_links`].
pub const MAX_LINKS_LIMIT: usize = 1000;

/// Lower bound for [`ProcessingConfig::max_content_length`].
pub const MAX_CONTENT_LENGTH_FLOOR: usize = 100;

// === Discovery ===

/// Where to look for links.
///
/// All fields are optional; an empty `css` list selects every anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkSelectors {
    /// CSS selectors evaluated in order; matches are concatenated.
    pub css: Vec<String>,

    /// A link survives only if its URL matches at least one of these
    /// (case-insensitive search).
    pub url_patterns: Vec<String>,

    /// A link survives only if its text matches at least one of these
    /// (case-insensitive search).
    pub text_patterns: Vec<String>,
}

impl LinkSelectors {
    /// Check that every CSS selector parses.
    ///
    /// Regex patterns are checked when [`crate::links::filter::LinkFilter`]
    /// compiles them.
    pub fn validate(&self) -> Result<()> {
        self.css.iter().try_for_each(|css| dom::validate_selector(css))
    }
}

/// How to narrow the candidate links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkFilters {
    /// Minimum visible text length (characters).
    ///
    /// Default: `0`
    pub min_text_length: usize,

    /// Hard cap on returned links, `1..=1000`.
    ///
    /// Default: `100`
    pub max_links: usize,

    /// A link is dropped if its URL matches any of these (case-insensitive search).
    pub exclude_patterns: Vec<String>,

    /// Keep links whose host differs from the page's host.
    ///
    /// Default: `false`
    pub include_external: bool,
}

impl Default for LinkFilters {
    fn default() -> Self {
        Self {
            min_text_length: 0,
            max_links: 100,
            exclude_patterns: Vec::new(),
            include_external: false,
        }
    }
}

impl LinkFilters {
    /// Check numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_LINKS_LIMIT).contains(&self.max_links) {
            return Err(Error::InvalidConfig(format!(
                "maxLinks must be between 1 and {MAX_LINKS_LIMIT}, got {}",
                self.max_links
            )));
        }
        Ok(())
    }
}

// === Extraction ===

/// Output format for extracted content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Serialized markup.
    Html,
    /// Markdown rendition supplied by the fetch step.
    #[default]
    Markdown,
    /// Plain text.
    Text,
}

impl ContentFormat {
    /// Lowercase name used in extraction-method tags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }
}

/// Title resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TitleExtraction {
    /// Selectors tried in order before the built-in chain.
    pub selectors: Vec<String>,

    /// Fall back to `h1`, `og:title` and `<title>` when the custom
    /// selectors find nothing.
    ///
    /// Default: `true`
    pub fallback_to_meta: bool,
}

impl Default for TitleExtraction {
    fn default() -> Self {
        Self {
            selectors: Vec::new(),
            fallback_to_meta: true,
        }
    }
}

/// Body content resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentExtraction {
    /// Selectors tried in order; the first with a match wins.
    pub selectors: Vec<String>,

    /// Output format.
    ///
    /// Default: `markdown`
    pub format: ContentFormat,

    /// Elements removed from the working copy before any selection.
    pub remove_selectors: Vec<String>,

    /// Render Markdown from the matched element instead of returning the
    /// whole-page Markdown.
    ///
    /// With the default `false`, a selector match under the `markdown`
    /// format only decides the extraction method; the content is still the
    /// fetcher's whole-page rendition.
    ///
    /// Default: `false`
    pub scope_markdown: bool,
}

/// A user-defined field read from one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Key in the output map.
    pub name: String,
    /// CSS selector for the element.
    pub selector: String,
    /// Attribute to read; the element's text when absent.
    #[serde(default)]
    pub attribute: Option<String>,
}

/// What to pull out of a scraped page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractConfig {
    pub title: TitleExtraction,
    pub content: ContentExtraction,
    /// Meta tag names to collect.
    pub metadata: Vec<String>,
    pub custom_fields: Vec<CustomField>,
}

impl ExtractConfig {
    /// Check every selector this config will evaluate.
    pub fn validate(&self) -> Result<()> {
        let selectors = self
            .title
            .selectors
            .iter()
            .chain(&self.content.selectors)
            .chain(&self.content.remove_selectors)
            .chain(self.custom_fields.iter().map(|field| &field.selector));

        for css in selectors {
            dom::validate_selector(css)?;
        }

        if let Some(field) = self.custom_fields.iter().find(|f| f.name.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "custom field for selector {:?} has an empty name",
                field.selector
            )));
        }

        Ok(())
    }
}

/// Normalization and acceptance thresholds for scraped content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessingConfig {
    /// Content shorter than this (characters) is rejected.
    ///
    /// Default: `200`
    pub min_content_length: usize,

    /// Content longer than this (characters) is truncated and marked.
    ///
    /// Default: `40000`
    pub max_content_length: usize,

    /// Remove markup from non-text formats.
    ///
    /// Default: `false`
    pub strip_html: bool,

    /// Collapse whitespace runs and trim.
    ///
    /// Default: `true`
    pub normalize_whitespace: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            min_content_length: 200,
            max_content_length: 40_000,
            strip_html: false,
            normalize_whitespace: true,
        }
    }
}

impl ProcessingConfig {
    /// Check numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if self.max_content_length < MAX_CONTENT_LENGTH_FLOOR {
            return Err(Error::InvalidConfig(format!(
                "maxContentLength must be at least {MAX_CONTENT_LENGTH_FLOOR}, got {}",
                self.max_content_length
            )));
        }
        Ok(())
    }
}

// === Fetching ===

/// Options forwarded to the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Ask the fetcher to execute JavaScript.
    ///
    /// Default: `true`
    pub js_enabled: bool,

    /// Ask the fetcher to apply its anti-bot measures.
    ///
    /// Default: `true`
    pub anti_bot_bypass: bool,

    /// Fetch timeout in milliseconds.
    ///
    /// Default: `30000`
    pub timeout_ms: u64,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            js_enabled: true,
            anti_bot_bypass: true,
            timeout_ms: 30_000,
        }
    }
}

impl CrawlOptions {
    /// Check numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(Error::InvalidConfig("timeoutMs must be positive".to_string()));
        }
        Ok(())
    }
}

// === Requests ===

/// A link discovery request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverRequest {
    /// Page to fetch; also the base for resolving relative links.
    pub url: String,
    #[serde(default)]
    pub selectors: LinkSelectors,
    #[serde(default)]
    pub filters: LinkFilters,
    #[serde(default)]
    pub options: CrawlOptions,
}

impl DiscoverRequest {
    /// Create a request with every block at its default.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Validate the URL and every configuration block.
    pub fn validate(&self) -> Result<()> {
        validate_request_url(&self.url)?;
        self.selectors.validate()?;
        self.filters.validate()?;
        self.options.validate()
    }
}

/// A content scrape request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    /// Page to fetch.
    pub url: String,

    /// Title used when the page yields none.
    #[serde(default, alias = "title")]
    pub fallback_title: Option<String>,

    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub options: CrawlOptions,
}

impl ScrapeRequest {
    /// Create a request with every block at its default.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Validate the URL and every configuration block.
    pub fn validate(&self) -> Result<()> {
        validate_request_url(&self.url)?;
        self.extract.validate()?;
        self.processing.validate()?;
        self.options.validate()
    }
}

fn validate_request_url(url: &str) -> Result<()> {
    if url_utils::parse_url(url).is_none() {
        return Err(Error::InvalidConfig(format!(
            "url must be an absolute http(s) URL, got {url:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_values() {
        let filters = LinkFilters::default();
        assert_eq!(filters.min_text_length, 0);
        assert_eq!(filters.max_links, 100);
        assert!(filters.exclude_patterns.is_empty());
        assert!(!filters.include_external);

        let processing = ProcessingConfig::default();
        assert_eq!(processing.min_content_length, 200);
        assert_eq!(processing.max_content_length, 40_000);
        assert!(!processing.strip_html);
        assert!(processing.normalize_whitespace);

        let extract = ExtractConfig::default();
        assert!(extract.title.fallback_to_meta);
        assert_eq!(extract.content.format, ContentFormat::Markdown);
        assert!(!extract.content.scope_markdown);

        let options = CrawlOptions::default();
        assert!(options.js_enabled);
        assert!(options.anti_bot_bypass);
        assert_eq!(options.timeout_ms, 30_000);
    }

    #[test]
    fn test_absent_blocks_deserialize_to_defaults() {
        let request: ScrapeRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a"}"#).unwrap();

        assert_eq!(request.processing, ProcessingConfig::default());
        assert_eq!(request.extract, ExtractConfig::default());
        assert_eq!(request.options, CrawlOptions::default());
        assert!(request.fallback_title.is_none());
    }

    #[test]
    fn test_partial_blocks_keep_remaining_defaults() {
        let request: DiscoverRequest = serde_json::from_str(
            r#"{
                "url": "https://example.com/",
                "filters": {"maxLinks": 5},
                "selectors": {"urlPatterns": ["/article/"]}
            }"#,
        )
        .unwrap();

        assert_eq!(request.filters.max_links, 5);
        assert_eq!(request.filters.min_text_length, 0);
        assert!(!request.filters.include_external);
        assert_eq!(request.selectors.url_patterns, vec!["/article/".to_string()]);
        assert!(request.selectors.css.is_empty());
    }

    #[test]
    fn test_legacy_title_alias() {
        let request: ScrapeRequest =
            serde_json::from_str(r#"{"url": "https://example.com/a", "title": "From caller"}"#)
                .unwrap();
        assert_eq!(request.fallback_title.as_deref(), Some("From caller"));
    }

    #[test]
    fn test_content_format_lowercase() {
        let content: ContentExtraction =
            serde_json::from_str(r#"{"format": "html", "selectors": ["article"]}"#).unwrap();
        assert_eq!(content.format, ContentFormat::Html);
        assert_eq!(ContentFormat::Text.as_str(), "text");
    }

    #[test]
    fn test_max_links_range() {
        for bad in [0, MAX_LINKS_LIMIT + 1] {
            let filters = LinkFilters {
                max_links: bad,
                ..LinkFilters::default()
            };
            let err = filters.validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        }

        for good in [1, MAX_LINKS_LIMIT] {
            let filters = LinkFilters {
                max_links: good,
                ..LinkFilters::default()
            };
            assert!(filters.validate().is_ok());
        }
    }

    #[test]
    fn test_max_content_length_floor() {
        let processing = ProcessingConfig {
            max_content_length: 99,
            ..ProcessingConfig::default()
        };
        assert!(processing.validate().is_err());

        let processing = ProcessingConfig {
            max_content_length: 100,
            ..ProcessingConfig::default()
        };
        assert!(processing.validate().is_ok());
    }

    #[test]
    fn test_malformed_selector_is_a_selector_error() {
        let mut request = ScrapeRequest::new("https://example.com/a");
        request.extract.content.remove_selectors = vec!["div[".to_string()];

        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SelectorError);
    }

    #[test]
    fn test_custom_field_selector_is_validated() {
        let mut request = ScrapeRequest::new("https://example.com/a");
        request.extract.custom_fields = vec![CustomField {
            name: "price".to_string(),
            selector: ">>".to_string(),
            attribute: None,
        }];

        assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::SelectorError);
    }

    #[test]
    fn test_request_url_must_be_absolute() {
        let request = DiscoverRequest::new("/relative");
        assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::InvalidConfig);

        let request = DiscoverRequest::new("https://news.example/section");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut request = DiscoverRequest::new("https://news.example/");
        request.options.timeout_ms = 0;
        assert!(request.validate().is_err());
    }
}
