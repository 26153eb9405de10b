//! URL classification for linkrank
//!
//! This module decides whether a discovered link is in-scope for the crawl:
//! same network authority as the seed, http or https scheme. Classification is
//! intentionally strict: no subdomain or www-equivalence folding, and no URL
//! normalization beyond what the crawler's extractor already did.

use url::Url;

/// Extracts the network authority (host, plus port if present) from a URL
///
/// The authority is what scope comparison runs on, so a crawl seeded at
/// `http://localhost:8080` does not leak onto `http://localhost:9090`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkrank::url::extract_authority;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Returns true if a candidate URL is in-scope for a crawl rooted at the
/// given authority
///
/// In-scope means: the candidate parses, its scheme is http or https, and its
/// authority is exactly equal to `base_authority`. The function is total;
/// malformed URLs classify as out-of-scope rather than erroring.
///
/// # Examples
///
/// ```
/// use linkrank::url::is_in_scope;
///
/// assert!(is_in_scope("https://example.com/page", "example.com"));
/// assert!(!is_in_scope("https://sub.example.com/page", "example.com"));
/// assert!(!is_in_scope("ftp://example.com/file", "example.com"));
/// assert!(!is_in_scope("not a url", "example.com"));
/// ```
pub fn is_in_scope(candidate: &str, base_authority: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && extract_authority(&url).as_deref() == Some(base_authority)
        }
        Err(_) => false,
    }
}
