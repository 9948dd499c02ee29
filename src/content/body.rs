//! Body content resolution.
//!
//! `remove_selectors` are applied to a working copy of the document before
//! anything is selected, so both the custom selectors and the format
//! fallback see the pruned tree while the caller's document is left
//! untouched. [`prune`] exposes that copy so later steps of the same
//! request can read from it too.
//!
//! Under the `markdown` format a selector match only decides the
//! extraction method: the content is the fetcher's whole-page Markdown
//! unless `scope_markdown` asks for the matched subtree to be rendered.

use dom_query::{Document, Selection};
use tracing::debug;

use crate::dom;
use crate::markdown;
use crate::options::{ContentExtraction, ContentFormat};

/// Page renditions supplied by the fetch step.
#[derive(Debug, Clone, Copy)]
pub struct PageSource<'a> {
    /// Raw markup as fetched.
    pub html: &'a str,
    /// Whole-page Markdown rendition.
    pub markdown: &'a str,
}

/// Raw (not yet normalized) content and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    pub content: String,
    pub method: String,
}

/// A working copy of the document with `remove_selectors` applied.
pub struct PrunedDocument {
    pub doc: Document,
    /// Elements removed across all selectors.
    pub removed: usize,
}

/// Build the pruned working copy, or `None` when nothing is to be removed.
///
/// `doc` itself is never modified.
#[must_use]
pub fn prune(doc: &Document, remove_selectors: &[String]) -> Option<PrunedDocument> {
    if remove_selectors.is_empty() {
        return None;
    }

    let working = dom::clone_document(doc);
    let removed = remove_selectors
        .iter()
        .map(|css| dom::remove_matching(&working, css))
        .sum();

    debug!(removed, "pruned working copy before content selection");

    Some(PrunedDocument { doc: working, removed })
}

/// Resolve body content from `doc`, which must be parsed from `page.html`.
#[must_use]
pub fn extract_content(doc: &Document, page: PageSource<'_>, config: &ContentExtraction) -> RawContent {
    match prune(doc, &config.remove_selectors) {
        Some(pruned) => resolve(&pruned.doc, page, config, pruned.removed > 0),
        None => resolve(doc, page, config, false),
    }
}

/// Resolve body content from an already pruned working document.
///
/// `pruned` tells the html fallback to serialize `doc` instead of returning
/// the fetched markup verbatim.
#[must_use]
pub fn resolve(doc: &Document, page: PageSource<'_>, config: &ContentExtraction, pruned: bool) -> RawContent {
    let matched = config
        .selectors
        .iter()
        .find_map(|css| dom::select_one(doc, css).map(|element| (css, element)));

    if let Some((css, element)) = matched {
        return RawContent {
            content: render_element(&element, page, config),
            method: format!("selector:{css}"),
        };
    }

    let content = match config.format {
        ContentFormat::Markdown => page.markdown.to_string(),
        ContentFormat::Html if pruned => dom::document_html(doc).to_string(),
        ContentFormat::Html => page.html.to_string(),
        ContentFormat::Text => dom::document_text(doc),
    };

    RawContent {
        content,
        method: format!("fallback:{}", config.format.as_str()),
    }
}

fn render_element(element: &Selection, page: PageSource<'_>, config: &ContentExtraction) -> String {
    match config.format {
        ContentFormat::Html => dom::outer_html(element).to_string(),
        ContentFormat::Text => dom::stripped_text(element),
        ContentFormat::Markdown if config.scope_markdown => {
            markdown::render(&dom::outer_html(element))
        }
        ContentFormat::Markdown => page.markdown.to_string(),
    }
}
