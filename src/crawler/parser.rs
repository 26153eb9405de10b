//! HTML link extraction
//!
//! This module parses fetched HTML and produces the set of absolute,
//! fragment-stripped URLs referenced by anchor elements. Extraction walks the
//! document in document order so it can stop at the "External links" section
//! marker: everything at or after that heading is reference/citation material
//! that would distort the link graph's topical signal.
//!
//! The marker rule is a site-convention heuristic (Wikipedia-style articles),
//! not a general extraction rule.

use scraper::{ElementRef, Html};
use std::collections::HashSet;
use url::Url;

/// Element id that marks the start of the reference/citation tail
const EXTERNAL_LINKS_MARKER: &str = "External_links";

/// Extracts all qualifying links from an HTML document
///
/// Rules, applied in order:
/// 1. anchors at or after the `External_links` marker are discarded;
/// 2. each remaining href is resolved against `base_url` to an absolute URL;
/// 3. the fragment component is stripped;
/// 4. URLs containing any exclusion substring are discarded.
///
/// Parsing is total: malformed markup yields whatever anchors the parser can
/// recover, never an error.
///
/// # Example
///
/// ```
/// use url::Url;
/// use linkrank::crawler::extract_links;
///
/// let html = r#"<html><body><a href="/wiki/Other#History">Link</a></body></html>"#;
/// let base = Url::parse("https://en.wikipedia.org/wiki/Start").unwrap();
/// let links = extract_links(html, &base, &[]);
/// assert!(links.contains("https://en.wikipedia.org/wiki/Other"));
/// ```
pub fn extract_links(html: &str, base_url: &Url, exclude_patterns: &[String]) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    // Pre-order traversal is document order, so breaking at the marker
    // discards every anchor at or after it.
    for node in document.root_element().descendants() {
        let element = match ElementRef::wrap(node) {
            Some(e) => e,
            None => continue,
        };

        if element.value().attr("id") == Some(EXTERNAL_LINKS_MARKER) {
            break;
        }

        if element.value().name() != "a" {
            continue;
        }

        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let resolved = match resolve_link(href, base_url) {
            Some(r) => r,
            None => continue,
        };

        if exclude_patterns.iter().any(|p| resolved.contains(p.as_str())) {
            continue;
        }

        links.insert(resolved);
    }

    links
}

/// Resolves an anchor href to an absolute, fragment-stripped URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - fragment-only links (same-page anchors)
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                absolute_url.set_fragment(None);
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/wiki/Page").unwrap()
    }

    fn extract(html: &str) -> HashSet<String> {
        extract_links(html, &base_url(), &[])
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<html><body><a href="https://example.com/wiki/Other">L</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/wiki/Other"));
    }

    #[test]
    fn test_extract_relative_link() {
        let links = extract(r#"<html><body><a href="/wiki/Other">L</a></body></html>"#);
        assert!(links.contains("https://example.com/wiki/Other"));
    }

    #[test]
    fn test_fragment_is_stripped() {
        let links = extract(r#"<html><body><a href="/wiki/Other#History">L</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/wiki/Other"));
    }

    #[test]
    fn test_fragment_only_link_skipped() {
        let links = extract(r##"<html><body><a href="#section">Jump</a></body></html>"##);
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicate_links_collapse() {
        let links = extract(
            r#"<html><body>
                <a href="/wiki/Other">One</a>
                <a href="/wiki/Other#Intro">Two</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_skip_special_schemes() {
        let links = extract(
            r#"<html><body>
                <a href="javascript:void(0)">J</a>
                <a href="mailto:a@b.com">M</a>
                <a href="tel:+123">T</a>
                <a href="data:text/html,hi">D</a>
            </body></html>"#,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_external_links_section_cut_off() {
        let links = extract(
            r#"<html><body>
                <a href="/wiki/Before">Before</a>
                <h2 id="External_links">External links</h2>
                <a href="https://elsewhere.org/ref">After</a>
                <a href="/wiki/AlsoAfter">After2</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/wiki/Before"));
    }

    #[test]
    fn test_external_links_marker_on_span() {
        // Legacy markup puts the id on a headline span inside the h2
        let links = extract(
            r#"<html><body>
                <a href="/wiki/Before">Before</a>
                <h2><span class="mw-headline" id="External_links">External links</span></h2>
                <a href="/wiki/After">After</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/wiki/Before"));
    }

    #[test]
    fn test_no_marker_keeps_everything() {
        let links = extract(
            r#"<html><body>
                <a href="/wiki/A">A</a>
                <a href="/wiki/B">B</a>
            </body></html>"#,
        );
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_exclusion_patterns() {
        let patterns = vec!["Help:".to_string(), "Special:".to_string()];
        let links = extract_links(
            r#"<html><body>
                <a href="/wiki/Help:Contents">H</a>
                <a href="/wiki/Special:Random">S</a>
                <a href="/wiki/Article">A</a>
            </body></html>"#,
            &base_url(),
            &patterns,
        );
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/wiki/Article"));
    }

    #[test]
    fn test_garbage_markup_yields_what_parses() {
        let links = extract(r#"<a href="/wiki/Other">unclosed <div><<<"#);
        assert!(links.contains("https://example.com/wiki/Other"));
    }

    #[test]
    fn test_empty_document() {
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_other_domain_links_are_extracted() {
        // Scope filtering is the classifier's job, not the extractor's
        let links = extract(r#"<html><body><a href="https://other.com/x">O</a></body></html>"#);
        assert!(links.contains("https://other.com/x"));
    }
}
