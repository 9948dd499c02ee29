//! Link discovery.
//!
//! Composes the [`select`] stage (candidates, resolution, de-duplication)
//! with the [`filter`] stage (ordered rules and the hard cap).

pub mod filter;
pub mod select;

use tracing::debug;

use crate::dom;
use crate::error::Result;
use crate::options::{LinkFilters, LinkSelectors};
use crate::result::LinkDiscovery;

pub use filter::LinkFilter;

/// Discover links in raw markup using an already-compiled filter.
///
/// `css` must already be validated; see [`LinkSelectors::validate`].
#[must_use]
pub fn discover_with(html: &str, base_url: &str, css: &[String], filter: &LinkFilter) -> LinkDiscovery {
    let doc = dom::parse(html);
    let candidates = select::select_links(&doc, css, base_url);
    let total_links_on_page = candidates.len();

    debug!(candidates = total_links_on_page, "link candidates selected");

    LinkDiscovery {
        links: filter.apply(candidates, base_url),
        total_links_on_page,
    }
}

/// Discover links in raw markup.
///
/// Validates selectors and filters, compiles patterns, then selects and
/// filters. `base_url` is the page URL used for resolution and the
/// same-host rule.
///
/// # Example
///
/// ```rust
/// use rs_crawlkit::{discover_links, LinkFilters, LinkSelectors};
///
/// let html = r#"<a href="/article/42">Big Story</a>
///               <a href="https://other.example/article/1">Other</a>"#;
/// let found = discover_links(
///     html,
///     "https://news.example/section",
///     &LinkSelectors::default(),
///     &LinkFilters::default(),
/// )?;
///
/// assert_eq!(found.links.len(), 1);
/// assert_eq!(found.links[0].url, "https://news.example/article/42");
/// # Ok::<(), rs_crawlkit::Error>(())
/// ```
pub fn discover(
    html: &str,
    base_url: &str,
    selectors: &LinkSelectors,
    filters: &LinkFilters,
) -> Result<LinkDiscovery> {
    selectors.validate()?;
    filters.validate()?;
    let filter = LinkFilter::new(selectors, filters)?;
    Ok(discover_with(html, base_url, &selectors.css, &filter))
}
