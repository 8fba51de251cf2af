//! HTTP cache control module
//!
//! `ETag` generation and `If-None-Match` evaluation for served files.

use hyper::header::{self, HeaderMap};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache-Control value for static web assets.
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=3600";

/// Quoted strong `ETag` derived from the content hash, e.g. `"9f2c01ab"`.
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// True when the request's `If-None-Match` lists `etag` or `*`.
///
/// Multiple header lines and comma-separated lists are both accepted.
pub fn is_not_modified(request_headers: &HeaderMap, etag: &str) -> bool {
    request_headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate == etag || weak_match(candidate, etag))
}

fn weak_match(candidate: &str, etag: &str) -> bool {
    candidate.strip_prefix("W/") == Some(etag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_etag_is_stable_and_quoted() {
        let a = etag_for(b"body { color: red }");
        let b = etag_for(b"body { color: red }");
        assert_eq!(a, b);
        assert!(a.starts_with('"') && a.ends_with('"'));
        assert_ne!(a, etag_for(b"body { color: blue }"));
    }

    #[test]
    fn test_if_none_match() {
        let etag = etag_for(b"hello");
        assert!(is_not_modified(&headers_with(&etag), &etag));
        assert!(is_not_modified(&headers_with("*"), &etag));
        assert!(!is_not_modified(&headers_with("\"other\""), &etag));
        assert!(!is_not_modified(&HeaderMap::new(), &etag));
    }

    #[test]
    fn test_if_none_match_list_and_weak() {
        let etag = "\"abc\"";
        assert!(is_not_modified(&headers_with("\"x\", \"abc\""), etag));
        assert!(is_not_modified(&headers_with("W/\"abc\""), etag));
    }
}
