//! Markdown rendering.
//!
//! Converts markup to GitHub Flavored Markdown with `quick_html2md`. Used
//! by the bundled fetchers to produce the whole-page rendition and by
//! scoped-markdown extraction for a single matched element.

use std::sync::LazyLock;

use quick_html2md::{html_to_markdown_with_options, MarkdownOptions};
use regex::Regex;

/// Three or more consecutive newlines (with optional blank-line whitespace).
#[allow(clippy::expect_used)]
static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*){2,}").expect("EXCESS_BLANK_LINES regex"));

/// Render markup as Markdown.
///
/// Links and tables are kept; images are dropped. Runs of blank lines are
/// squeezed to one and the result is trimmed.
///
/// # Examples
///
/// ```
/// use rs_crawlkit::markdown::render;
///
/// let md = render("<h1>Title</h1><p>Body</p>");
/// assert!(md.contains("# Title"));
/// assert!(md.contains("Body"));
/// ```
#[must_use]
pub fn render(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let options = MarkdownOptions::new()
        .include_links(true)
        .include_images(false)
        .preserve_tables(true);

    squeeze_blank_lines(&html_to_markdown_with_options(html, &options))
}

/// Collapse runs of blank lines into a single blank line and trim.
#[must_use]
pub fn squeeze_blank_lines(markdown: &str) -> String {
    EXCESS_BLANK_LINES
        .replace_all(markdown, "\n\n")
        .trim()
        .to_string()
}
