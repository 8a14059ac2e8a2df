//! Canonical URL handling.
//!
//! The remote service and the metadata cache are both keyed by a canonical
//! form of the image URL: query parameters stripped, and (for the cache) the
//! result percent-decoded. One canonicalization rule, applied uniformly.

use std::borrow::Cow;

/// Strips query parameters from a URL, yielding the canonical service key.
#[must_use]
pub fn canonical_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Derives the cache key for a URL: canonical form, percent-decoded.
///
/// Undecodable sequences leave the canonical form untouched rather than
/// producing a second key shape for the same image.
#[must_use]
pub fn cache_key(url: &str) -> String {
    let canonical = canonical_url(url);
    match urlencoding::decode(canonical) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => canonical.to_string(),
    }
}
