//! Link Filter Pipeline
//!
//! Rules run in a fixed order per candidate and stop at the first failure:
//!
//! 1. minimum text length
//! 2. URL inclusion patterns (any must match)
//! 3. text inclusion patterns (any must match)
//! 4. URL exclusion patterns (none may match)
//! 5. same-host check, unless external links are allowed
//!
//! Accepted links accumulate until `max_links` is reached; candidates after
//! that point are never evaluated.
//!
//! Patterns are compiled once per request into a [`LinkFilter`] and are
//! never shared between requests.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::{LinkFilters, LinkSelectors};
use crate::result::DiscoveredLink;
use crate::url_utils;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Link text is shorter than `min_text_length`.
    TextTooShort,
    /// No URL pattern matched.
    UrlPatternMiss,
    /// No text pattern matched.
    TextPatternMiss,
    /// An exclusion pattern matched the URL.
    Excluded,
    /// Host differs from the page and external links are not allowed.
    External,
}

/// Request-scoped, compiled link filter.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    min_text_length: usize,
    max_links: usize,
    include_external: bool,
    url_patterns: Vec<Regex>,
    text_patterns: Vec<Regex>,
    exclude_patterns: Vec<Regex>,
}

impl LinkFilter {
    /// Compile the request's patterns.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not compile.
    pub fn new(selectors: &LinkSelectors, filters: &LinkFilters) -> Result<Self> {
        Ok(Self {
            min_text_length: filters.min_text_length,
            max_links: filters.max_links,
            include_external: filters.include_external,
            url_patterns: compile_patterns(&selectors.url_patterns)?,
            text_patterns: compile_patterns(&selectors.text_patterns)?,
            exclude_patterns: compile_patterns(&filters.exclude_patterns)?,
        })
    }

    /// Run the rules against one candidate.
    ///
    /// # Returns
    /// * `None` if the candidate is accepted, otherwise the first failing rule
    #[must_use]
    pub fn check(&self, link: &DiscoveredLink, base_url: &str) -> Option<Rejection> {
        if link.text.chars().count() < self.min_text_length {
            return Some(Rejection::TextTooShort);
        }

        if !self.url_patterns.is_empty() && !any_match(&self.url_patterns, &link.url) {
            return Some(Rejection::UrlPatternMiss);
        }

        if !self.text_patterns.is_empty() && !any_match(&self.text_patterns, &link.text) {
            return Some(Rejection::TextPatternMiss);
        }

        if any_match(&self.exclude_patterns, &link.url) {
            return Some(Rejection::Excluded);
        }

        if !self.include_external && !url_utils::same_host(&link.url, base_url) {
            return Some(Rejection::External);
        }

        None
    }

    /// Filter candidates in order, stopping once `max_links` are accepted.
    #[must_use]
    pub fn apply(&self, candidates: Vec<DiscoveredLink>, base_url: &str) -> Vec<DiscoveredLink> {
        let mut accepted = Vec::with_capacity(candidates.len().min(self.max_links));
        let mut rejected = 0usize;

        for link in candidates {
            if accepted.len() >= self.max_links {
                break;
            }

            match self.check(&link, base_url) {
                None => accepted.push(link),
                Some(reason) => {
                    rejected += 1;
                    debug!(url = %link.url, ?reason, "link rejected");
                }
            }
        }

        debug!(
            accepted = accepted.len(),
            rejected,
            max_links = self.max_links,
            "link filtering finished"
        );

        accepted
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn any_match(patterns: &[Regex], haystack: &str) -> bool {
    patterns.iter().any(|re| re.is_match(haystack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BASE: &str = "https://news.example/section";

    fn link(url: &str, text: &str) -> DiscoveredLink {
        DiscoveredLink {
            url: url.to_string(),
            text: text.to_string(),
            ..DiscoveredLink::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn filter(selectors: LinkSelectors, filters: LinkFilters) -> LinkFilter {
        LinkFilter::new(&selectors, &filters).unwrap()
    }

    #[test]
    fn test_min_text_length_runs_first() {
        let f = filter(
            LinkSelectors::default(),
            LinkFilters {
                min_text_length: 4,
                ..LinkFilters::default()
            },
        );

        // External and short: reported as too short, not external
        assert_eq!(
            f.check(&link("https://other.example/", "abc"), BASE),
            Some(Rejection::TextTooShort)
        );
        assert_eq!(f.check(&link("https://news.example/a", "abcd"), BASE), None);
    }

    #[test]
    fn test_url_patterns_case_insensitive_search() {
        let f = filter(
            LinkSelectors {
                url_patterns: strings(&["/article/"]),
                ..LinkSelectors::default()
            },
            LinkFilters::default(),
        );

        assert_eq!(f.check(&link("https://news.example/ARTICLE/42", "x"), BASE), None);
        assert_eq!(
            f.check(&link("https://news.example/about", "About"), BASE),
            Some(Rejection::UrlPatternMiss)
        );
    }

    #[test]
    fn test_text_patterns_any_match() {
        let f = filter(
            LinkSelectors {
                text_patterns: strings(&["^read", "story$"]),
                ..LinkSelectors::default()
            },
            LinkFilters::default(),
        );

        assert_eq!(f.check(&link("https://news.example/1", "Big Story"), BASE), None);
        assert_eq!(f.check(&link("https://news.example/2", "Read on"), BASE), None);
        assert_eq!(
            f.check(&link("https://news.example/3", "Contact"), BASE),
            Some(Rejection::TextPatternMiss)
        );
    }

    #[test]
    fn test_exclude_patterns() {
        let f = filter(
            LinkSelectors::default(),
            LinkFilters {
                exclude_patterns: strings(&[r"\?share=", "/tag/"]),
                ..LinkFilters::default()
            },
        );

        assert_eq!(
            f.check(&link("https://news.example/tag/politics", "Politics"), BASE),
            Some(Rejection::Excluded)
        );
        assert_eq!(f.check(&link("https://news.example/article/1", "One"), BASE), None);
    }

    #[test]
    fn test_external_links() {
        let strict = filter(LinkSelectors::default(), LinkFilters::default());
        assert_eq!(
            strict.check(&link("https://other.example/article/1", "Other"), BASE),
            Some(Rejection::External)
        );
        assert_eq!(
            strict.check(&link("mailto:desk@news.example", "Mail"), BASE),
            Some(Rejection::External)
        );

        let open = filter(
            LinkSelectors::default(),
            LinkFilters {
                include_external: true,
                ..LinkFilters::default()
            },
        );
        assert_eq!(open.check(&link("https://other.example/article/1", "Other"), BASE), None);
    }

    #[test]
    fn test_hard_cap_stops_evaluation() {
        let f = filter(
            LinkSelectors::default(),
            LinkFilters {
                max_links: 2,
                ..LinkFilters::default()
            },
        );
        let candidates = vec![
            link("https://news.example/1", "one"),
            link("https://other.example/x", "external"),
            link("https://news.example/2", "two"),
            link("https://news.example/3", "three"),
        ];

        let accepted = f.apply(candidates, BASE);
        let urls: Vec<_> = accepted.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["https://news.example/1", "https://news.example/2"]);
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let err = LinkFilter::new(
            &LinkSelectors {
                url_patterns: strings(&["(unclosed"]),
                ..LinkSelectors::default()
            },
            &LinkFilters::default(),
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SelectorError);
        assert!(err.to_string().contains("(unclosed"));
    }
}
