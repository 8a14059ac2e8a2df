//! Remote image service adapter.
//!
//! This module provides:
//! - Canonical URL handling (query stripping, decoded cache keys)
//! - The HTTP metadata provider (dimensions + placeholder queries)

pub mod http_provider;
pub mod urls;

pub use http_provider::HttpMetadataProvider;
pub use urls::{cache_key, canonical_url};
