//! Metadata and custom-field extraction.
//!
//! Both extractors return only what was found: absent meta tags, unmatched
//! selectors and missing attributes are omitted from the maps. A custom
//! field whose element or attribute is present but blank is kept as an
//! empty string.

use std::collections::BTreeMap;

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::CustomField;

/// Look up the `content` of a meta tag.
///
/// Tried in order: `<meta name="{name}">`, `<meta property="og:{name}">`,
/// then `<meta property="{name}">` so names such as `og:image` or
/// `article:published_time` can be requested verbatim. Names compare
/// case-insensitively; tags with blank content are skipped.
#[must_use]
pub fn meta_content(doc: &Document, name: &str) -> Option<String> {
    let metas = dom::select_all(doc, "meta");

    find_meta(&metas, "name", name)
        .or_else(|| find_meta(&metas, "property", &format!("og:{name}")))
        .or_else(|| find_meta(&metas, "property", name))
}

/// Look up the `content` of `<meta property="{property}">`.
#[must_use]
pub fn meta_property(doc: &Document, property: &str) -> Option<String> {
    find_meta(&dom::select_all(doc, "meta"), "property", property)
}

fn find_meta(metas: &[Selection], attr: &str, wanted: &str) -> Option<String> {
    metas.iter().find_map(|meta| {
        let key = dom::get_attribute(meta, attr)?;
        if !key.trim().eq_ignore_ascii_case(wanted) {
            return None;
        }
        dom::non_empty_attribute(meta, "content")
    })
}

/// Collect the requested meta tags.
#[must_use]
pub fn extract_metadata(doc: &Document, names: &[String]) -> BTreeMap<String, String> {
    names
        .iter()
        .filter_map(|name| meta_content(doc, name).map(|value| (name.clone(), value)))
        .collect()
}

/// Read each custom field from the first element its selector matches.
///
/// With an `attribute` the trimmed attribute value is used, otherwise the
/// element's text with whitespace collapsed. A field is omitted only when
/// its selector matches nothing or the attribute is missing.
#[must_use]
pub fn extract_custom_fields(doc: &Document, fields: &[CustomField]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for field in fields {
        let Some(element) = dom::select_one(doc, &field.selector) else {
            continue;
        };

        let value = match &field.attribute {
            Some(attr) => dom::get_attribute(&element, attr).map(|v| v.trim().to_string()),
            None => Some(dom::stripped_text(&element)),
        };

        if let Some(value) = value {
            values.insert(field.name.clone(), value);
        }
    }

    values
}
