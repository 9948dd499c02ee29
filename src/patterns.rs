//! Compiled regex patterns shared across requests.
//!
//! These are fixed, crate-owned patterns compiled once using `LazyLock`.
//! User-supplied patterns are never cached here; they are compiled per
//! request by [`crate::links::filter::LinkFilter`].

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches a URL scheme prefix such as `https:`, `mailto:` or `javascript:`.
///
/// Follows the RFC 3986 scheme grammar: a letter followed by letters,
/// digits, `+`, `-` or `.`, then a colon.
pub static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("SCHEME_PREFIX regex")
});

/// Matches any run of whitespace (including non-breaking and other Unicode spaces).
pub static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// Collapse all whitespace runs to single spaces and trim both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
