//! Title resolution.
//!
//! An ordered chain of strategies; the first non-empty result wins.
//! Custom selectors run first, then the built-in chain: first `h1`, the
//! `og:title` meta property, the `<title>` element.

use dom_query::Document;

use crate::content::fields;
use crate::dom;
use crate::options::TitleExtraction;

/// A single way of finding a title.
pub type TitleStrategy = fn(&Document) -> Option<String>;

/// Built-in chain used after custom selectors.
pub const BUILTIN_CHAIN: [TitleStrategy; 3] = [heading_title, og_title, document_title];

/// Resolve the page title.
///
/// The built-in chain runs when `fallback_to_meta` is set or when no custom
/// selectors are configured.
#[must_use]
pub fn extract_title(doc: &Document, config: &TitleExtraction) -> Option<String> {
    let custom = config
        .selectors
        .iter()
        .find_map(|css| selector_text(doc, css));

    if custom.is_some() {
        return custom;
    }

    if config.fallback_to_meta || config.selectors.is_empty() {
        return BUILTIN_CHAIN.iter().find_map(|strategy| strategy(doc));
    }

    None
}

fn selector_text(doc: &Document, css: &str) -> Option<String> {
    dom::select_one(doc, css)
        .map(|sel| dom::stripped_text(&sel))
        .filter(|text| !text.is_empty())
}

fn heading_title(doc: &Document) -> Option<String> {
    selector_text(doc, "h1")
}

fn og_title(doc: &Document) -> Option<String> {
    fields::meta_property(doc, "og:title")
}

fn document_title(doc: &Document) -> Option<String> {
    selector_text(doc, "title")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(selectors: &[&str], fallback_to_meta: bool) -> TitleExtraction {
        TitleExtraction {
            selectors: selectors.iter().map(ToString::to_string).collect(),
            fallback_to_meta,
        }
    }

    #[test]
    fn test_custom_selector_first() {
        let doc = dom::parse(r#"<h1>Heading</h1><div class="headline"> Custom  Title </div>"#);
        let title = extract_title(&doc, &config(&[".missing", ".headline"], true));
        assert_eq!(title.as_deref(), Some("Custom Title"));
    }

    #[test]
    fn test_builtin_chain_order() {
        let all = r#"<html><head><title>Doc Title</title>
            <meta property="og:title" content="OG Title"></head>
            <body><h1>Heading</h1></body></html>"#;
        let doc = dom::parse(all);
        assert_eq!(extract_title(&doc, &TitleExtraction::default()).as_deref(), Some("Heading"));

        let no_h1 = r#"<html><head><title>Doc Title</title>
            <meta property="og:title" content="OG Title"></head><body></body></html>"#;
        let doc = dom::parse(no_h1);
        assert_eq!(extract_title(&doc, &TitleExtraction::default()).as_deref(), Some("OG Title"));

        let only_title = "<html><head><title>Doc Title</title></head><body></body></html>";
        let doc = dom::parse(only_title);
        assert_eq!(extract_title(&doc, &TitleExtraction::default()).as_deref(), Some("Doc Title"));
    }

    #[test]
    fn test_empty_heading_skipped() {
        let doc = dom::parse(r#"<html><head><title>Doc Title</title></head><body><h1>  </h1></body></html>"#);
        assert_eq!(extract_title(&doc, &TitleExtraction::default()).as_deref(), Some("Doc Title"));
    }

    #[test]
    fn test_no_meta_fallback_with_custom_selectors() {
        let doc = dom::parse("<html><head><title>Doc Title</title></head><body><h1>H</h1></body></html>");
        assert_eq!(extract_title(&doc, &config(&[".missing"], false)), None);
    }

    #[test]
    fn test_meta_fallback_forced_without_custom_selectors() {
        let doc = dom::parse("<html><head><title>Doc Title</title></head></html>");
        assert_eq!(
            extract_title(&doc, &config(&[], false)).as_deref(),
            Some("Doc Title")
        );
    }

    #[test]
    fn test_nothing_found() {
        let doc = dom::parse("<html><body><p>text</p></body></html>");
        assert_eq!(extract_title(&doc, &TitleExtraction::default()), None);
    }
}
