//! Content Normalizer & Validator
//!
//! Normalization order: markup stripping (non-text formats only), whitespace
//! collapsing, then truncation. Applying [`normalize`] to its own output
//! returns the same string.

use crate::dom;
use crate::error::{Error, Result};
use crate::options::{ContentFormat, ProcessingConfig};
use crate::patterns::collapse_whitespace;

/// Appended when content is cut at `max_content_length`.
pub const TRUNCATION_MARKER: &str = "...";

/// Normalize extracted content according to `processing`.
#[must_use]
pub fn normalize(content: &str, format: ContentFormat, processing: &ProcessingConfig) -> String {
    let mut out = if processing.strip_html && format != ContentFormat::Text {
        dom::strip_markup(content)
    } else {
        content.to_string()
    };

    if processing.normalize_whitespace {
        out = collapse_whitespace(&out);
    }

    truncate(out, processing.max_content_length)
}

/// Cut `content` to `max_chars` characters and append the marker.
///
/// The marker counts toward the final length, which may therefore exceed
/// `max_chars` by the marker's length.
#[must_use]
pub fn truncate(content: String, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        None => content,
        Some((cut, _)) => {
            let mut truncated = content[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}

/// Accept content at least `min_content_length` characters long.
///
/// # Errors
/// Returns [`Error::InsufficientContent`] with the observed and required lengths.
pub fn validate(content: &str, processing: &ProcessingConfig) -> Result<()> {
    let observed = content.chars().count();
    if observed < processing.min_content_length {
        return Err(Error::InsufficientContent {
            observed,
            required: processing.min_content_length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processing(max: usize) -> ProcessingConfig {
        ProcessingConfig {
            max_content_length: max,
            ..ProcessingConfig::default()
        }
    }

    #[test]
    fn test_whitespace_collapsed_by_default() {
        let out = normalize("  a\n\n b\t\tc  ", ContentFormat::Markdown, &ProcessingConfig::default());
        assert_eq!(out, "a b c");
    }

    #[test]
    fn test_whitespace_kept_when_disabled() {
        let config = ProcessingConfig {
            normalize_whitespace: false,
            ..ProcessingConfig::default()
        };
        assert_eq!(normalize(" a\n b ", ContentFormat::Markdown, &config), " a\n b ");
    }

    #[test]
    fn test_strip_html_for_markup_formats() {
        let config = ProcessingConfig {
            strip_html: true,
            ..ProcessingConfig::default()
        };
        let html = "<article><h1>Title</h1><p>Body <em>text</em></p></article>";

        let out = normalize(html, ContentFormat::Html, &config);
        assert!(!out.contains('<'));
        assert!(out.contains("Body text"));
    }

    #[test]
    fn test_strip_html_skipped_for_text_format() {
        let config = ProcessingConfig {
            strip_html: true,
            ..ProcessingConfig::default()
        };
        assert_eq!(normalize("a <b> c", ContentFormat::Text, &config), "a <b> c");
    }

    #[test]
    fn test_truncation_appends_marker() {
        let content = "x".repeat(150);
        let out = normalize(&content, ContentFormat::Text, &processing(100));

        assert_eq!(out.chars().count(), 100 + TRUNCATION_MARKER.len());
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_no_marker_at_exact_limit() {
        let content = "x".repeat(100);
        assert_eq!(normalize(&content, ContentFormat::Text, &processing(100)), content);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let content = "é".repeat(120);
        let out = truncate(content, 100);
        assert_eq!(out.chars().count(), 103);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let content = format!("  {}  \n {} ", "word ".repeat(40), "tail ".repeat(10));
        let config = processing(100);

        let once = normalize(&content, ContentFormat::Markdown, &config);
        let twice = normalize(&once, ContentFormat::Markdown, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_minimum_length_gate() {
        let config = ProcessingConfig::default();

        let err = validate(&"x".repeat(199), &config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("199") && msg.contains("200"));

        assert!(validate(&"x".repeat(200), &config).is_ok());
    }
}
