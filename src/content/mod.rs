//! Content extraction.
//!
//! Composes the title chain, body resolution, normalization and the
//! metadata/custom-field extractors into one [`Extraction`].

pub mod body;
pub mod fields;
pub mod processing;
pub mod title;

use tracing::debug;

use crate::dom;
use crate::error::Result;
use crate::options::{ExtractConfig, ProcessingConfig};
use crate::result::{Extraction, ScrapedData};

pub use body::PageSource;

/// Extract and normalize content from one fetched page.
///
/// The title is resolved from the page as fetched. `remove_selectors` are
/// then applied to a working copy, and body content, metadata and custom
/// fields are all read from that pruned copy.
///
/// Selectors must already be validated (see [`ExtractConfig::validate`]).
/// The minimum-length gate is not applied here; see [`processing::validate`].
#[must_use]
pub fn extract_with(
    page: PageSource<'_>,
    config: &ExtractConfig,
    processing: &ProcessingConfig,
    fallback_title: Option<&str>,
) -> Extraction {
    let doc = dom::parse(page.html);

    let title = title::extract_title(&doc, &config.title).or_else(|| {
        fallback_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
    });

    // Pruning is part of this request: content, metadata and custom fields
    // all read from the same working copy.
    let pruned = body::prune(&doc, &config.content.remove_selectors);
    let (working, removed) = pruned.as_ref().map_or((&doc, 0), |p| (&p.doc, p.removed));

    let raw = body::resolve(working, page, &config.content, removed > 0);
    let format = config.content.format;
    let content = processing::normalize(&raw.content, format, processing);

    debug!(
        method = %raw.method,
        raw_chars = raw.content.chars().count(),
        chars = content.chars().count(),
        "content resolved"
    );

    let mut data = ScrapedData::new(title, content, format);
    if !config.metadata.is_empty() {
        data.metadata = Some(fields::extract_metadata(working, &config.metadata));
    }
    if !config.custom_fields.is_empty() {
        data.custom_fields = Some(fields::extract_custom_fields(working, &config.custom_fields));
    }

    Extraction {
        data,
        method: raw.method,
    }
}

/// Extract content from raw markup and its Markdown rendition.
///
/// Validates the configuration, extracts, then applies the minimum-length
/// gate.
///
/// # Errors
/// * [`crate::Error::InvalidSelector`] / [`crate::Error::InvalidConfig`] for bad configuration
/// * [`crate::Error::InsufficientContent`] when the normalized content is too short
///
/// # Example
///
/// ```rust
/// use rs_crawlkit::{scrape_document, ContentFormat, ExtractConfig, PageSource, ProcessingConfig};
///
/// let html = "<html><body><article><p>Plenty of words here.</p></article></body></html>";
/// let mut config = ExtractConfig::default();
/// config.content.selectors = vec!["article".to_string()];
/// config.content.format = ContentFormat::Text;
/// let processing = ProcessingConfig { min_content_length: 10, ..ProcessingConfig::default() };
///
/// let page = PageSource { html, markdown: "" };
/// let extraction = scrape_document(page, &config, &processing, None)?;
/// assert_eq!(extraction.data.content, "Plenty of words here.");
/// assert_eq!(extraction.method, "selector:article");
/// # Ok::<(), rs_crawlkit::Error>(())
/// ```
pub fn extract(
    page: PageSource<'_>,
    config: &ExtractConfig,
    processing: &ProcessingConfig,
    fallback_title: Option<&str>,
) -> Result<Extraction> {
    config.validate()?;
    processing.validate()?;

    let extraction = extract_with(page, config, processing, fallback_title);
    processing::validate(&extraction.data.content, processing)?;
    Ok(extraction)
}
