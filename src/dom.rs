//! DOM Operations Adapter
//!
//! The DOM-query collaborator is the `dom_query` crate. This adapter keeps
//! every call into it in one place, exposing the handful of operations the
//! discovery and extraction pipelines use: parse, select, select-one, text,
//! attribute, remove and serialize.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

// dom_query hands text and markup back as reference-counted tendrils
pub use tendril::StrTendril;

use dom_query::Matcher;

use crate::error::{Error, Result};
use crate::patterns::collapse_whitespace;

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Clone document
///
/// Produces an independent tree; mutations on the clone never reach the
/// source document.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Selector validation ===

/// Check that a CSS selector parses.
///
/// # Errors
/// Returns [`Error::InvalidSelector`] when the selector is empty or malformed.
pub fn validate_selector(css: &str) -> Result<()> {
    if css.trim().is_empty() || Matcher::new(css).is_err() {
        return Err(Error::InvalidSelector {
            selector: css.to_string(),
        });
    }
    Ok(())
}

// === Querying ===

/// Query all elements matching a CSS selector, in document order.
#[must_use]
pub fn select_all<'a>(doc: &'a Document, css: &str) -> Vec<Selection<'a>> {
    doc.select(css)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// Query the first element matching a CSS selector.
#[must_use]
pub fn select_one<'a>(doc: &'a Document, css: &str) -> Option<Selection<'a>> {
    doc.select(css).nodes().first().map(|node| Selection::from(*node))
}

// === Tree Navigation ===

/// Get parent element, if any
#[must_use]
pub fn parent_element<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    let parent = sel.parent();
    parent.exists().then_some(parent)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a non-blank attribute value, trimmed.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    get_attribute(sel, name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text content with whitespace collapsed and ends trimmed.
#[must_use]
pub fn stripped_text(sel: &Selection) -> String {
    collapse_whitespace(&text_content(sel))
}

/// Text of the whole document: the body when present, else the root element.
#[must_use]
pub fn document_text(doc: &Document) -> String {
    let body = doc.select("body");
    if body.exists() {
        return stripped_text(&body);
    }
    stripped_text(&doc.select("html"))
}

/// Strip all markup from a string, keeping only its text.
#[must_use]
pub fn strip_markup(markup: &str) -> String {
    document_text(&parse(markup))
}

// === Serialization ===

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Serialize the whole document.
#[inline]
#[must_use]
pub fn document_html(doc: &Document) -> StrTendril {
    doc.html()
}

// === Tree Manipulation ===

/// Remove every element matching a CSS selector.
///
/// # Returns
/// * The number of elements removed
pub fn remove_matching(doc: &Document, css: &str) -> usize {
    let matched = doc.select(css);
    let count = matched.length();
    if count > 0 {
        matched.remove();
    }
    count
}
