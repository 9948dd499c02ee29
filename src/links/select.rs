//! Link Selector
//!
//! Turns a parsed document into an ordered, de-duplicated list of link
//! candidates. Custom CSS selectors are evaluated in the order given and
//! their matches concatenated; without selectors every `a[href]` is taken
//! in document order.

use std::collections::{BTreeMap, HashSet};

use dom_query::{Document, Selection};

use crate::dom;
use crate::result::DiscoveredLink;
use crate::url_utils;

/// Selector used when the request supplies none.
pub const DEFAULT_LINK_SELECTOR: &str = "a[href]";

/// Maximum length of a link's context snippet (characters).
pub const CONTEXT_MAX_CHARS: usize = 200;

/// Select link candidates from `doc`, resolving hrefs against `base_url`.
///
/// Matches with an empty href are dropped. The first occurrence of each
/// resolved URL wins; later duplicates are discarded even when their text
/// differs.
#[must_use]
pub fn select_links(doc: &Document, css: &[String], base_url: &str) -> Vec<DiscoveredLink> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    let mut push_matches = |selector: &str, tag_selector: bool| {
        for sel in dom::select_all(doc, selector) {
            let Some(href) = dom::non_empty_attribute(&sel, "href") else {
                continue;
            };

            let url = url_utils::resolve(&href, base_url);
            if !seen.insert(url.clone()) {
                continue;
            }

            let text = dom::stripped_text(&sel);
            let mut metadata = link_metadata(&sel);
            if tag_selector {
                metadata.insert("selector".to_string(), selector.to_string());
            }

            candidates.push(DiscoveredLink {
                url,
                context: context_snippet(&sel, &text),
                text,
                metadata,
            });
        }
    };

    if css.is_empty() {
        push_matches(DEFAULT_LINK_SELECTOR, false);
    } else {
        for selector in css {
            push_matches(selector, true);
        }
    }

    candidates
}

/// Text of the enclosing element, or the link text when that is empty.
fn context_snippet(sel: &Selection, link_text: &str) -> String {
    let parent = dom::parent_element(sel);
    let surrounding = parent
        .as_ref()
        .map(dom::stripped_text)
        .filter(|text| !text.is_empty());

    let context = surrounding.as_deref().unwrap_or(link_text);
    context.chars().take(CONTEXT_MAX_CHARS).collect()
}

fn link_metadata(sel: &Selection) -> BTreeMap<String, String> {
    ["title", "rel"]
        .into_iter()
        .filter_map(|attr| dom::non_empty_attribute(sel, attr).map(|v| (attr.to_string(), v)))
        .collect()
}
