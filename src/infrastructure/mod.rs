//! Infrastructure layer with external service adapters.

/// Metadata cache persistence.
pub mod cache;
/// Pipeline configuration.
pub mod config;
/// Remote image service adapter.
pub mod metadata;

pub use cache::{CacheStats, MetadataCache};
pub use config::{PipelineConfig, ServiceConfig};
pub use metadata::{HttpMetadataProvider, cache_key, canonical_url};
