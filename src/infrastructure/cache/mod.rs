//! Metadata cache persistence.

pub mod file_cache;

pub use file_cache::{CacheError, CacheStats, MetadataCache};
