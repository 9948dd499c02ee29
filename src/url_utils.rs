//! URL Utility Functions
//!
//! Resolution of link targets against the page URL and host comparison
//! for the external-domain filter. Nothing here touches the network and
//! nothing here fails: inputs that cannot be resolved are passed through
//! unchanged so later filters can reject them.

use url::Url;

use crate::patterns::SCHEME_PREFIX;

/// Check whether a reference already carries a scheme (`https:`, `mailto:`, ...).
#[inline]
#[must_use]
pub fn has_scheme(href: &str) -> bool {
    SCHEME_PREFIX.is_match(href)
}

/// Parse a string as an absolute http(s) URL with a host.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let s = url_str.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }

    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Resolve an href against the page URL.
///
/// References that already have a scheme are returned unchanged. Relative
/// references are joined using standard resolution rules (rooted paths,
/// `../` segments, query and fragment preservation). When the base is not
/// a usable URL or the join fails, the trimmed href is returned as-is.
///
/// # Examples
/// ```
/// use rs_crawlkit::url_utils::resolve;
///
/// assert_eq!(
///     resolve("/article/42", "https://news.example/section"),
///     "https://news.example/article/42"
/// );
/// assert_eq!(resolve("mailto:desk@news.example", "https://news.example/"), "mailto:desk@news.example");
/// ```
#[must_use]
pub fn resolve(href: &str, base_url: &str) -> String {
    let href = href.trim();

    if href.is_empty() || has_scheme(href) {
        return href.to_string();
    }

    let Ok(base) = Url::parse(base_url.trim()) else {
        return href.to_string();
    };

    base.join(href)
        .map_or_else(|_| href.to_string(), |resolved| resolved.to_string())
}

/// Extract the host component of a URL, lowercased.
///
/// # Returns
/// * The host, or `None` when the URL has no host or does not parse
#[must_use]
pub fn host_of(url_str: &str) -> Option<String> {
    Url::parse(url_str.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

/// Check if a link points at the same host as the base URL.
///
/// A link without a host (e.g. `mailto:`) never matches a base that has one.
#[must_use]
pub fn same_host(link_url: &str, base_url: &str) -> bool {
    host_of(link_url) == host_of(base_url)
}
