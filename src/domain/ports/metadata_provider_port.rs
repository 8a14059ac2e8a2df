//! Port definition for remote image metadata lookup.

use async_trait::async_trait;

use crate::domain::entities::ImageDimensions;

/// Result type for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while querying the remote image service.
///
/// None of these are terminal for the pipeline: the orchestrator logs them
/// and falls back to the host's unmodified rendering.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("service returned HTTP {0}")]
    Status(u16),
    /// The response body could not be interpreted.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Port for fetching image metadata from a remote service.
///
/// Both operations are keyed by the canonical image URL (query parameters
/// already stripped by the caller) and are independent: the orchestrator
/// issues them concurrently, and a failure in one never cancels the other.
#[async_trait]
pub trait MetadataProviderPort: Send + Sync {
    /// Fetches the original pixel dimensions of the image.
    async fn fetch_dimensions(&self, url: &str) -> ProviderResult<ImageDimensions>;

    /// Fetches a placeholder representation as a display-ready data URI.
    async fn fetch_placeholder(&self, url: &str) -> ProviderResult<String>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scriptable provider for orchestrator tests. Records every URL it is
    /// asked about so tests can assert that ineligible references never
    /// reach the service.
    pub struct StubMetadataProvider {
        dimensions: Option<ImageDimensions>,
        placeholder: Option<String>,
        pub dimension_calls: AtomicUsize,
        pub placeholder_calls: AtomicUsize,
        pub requested_urls: Mutex<Vec<String>>,
    }

    impl StubMetadataProvider {
        /// Creates a stub answering with the given results; `None` means the
        /// corresponding fetch fails with a network error.
        pub fn new(dimensions: Option<ImageDimensions>, placeholder: Option<String>) -> Self {
            Self {
                dimensions,
                placeholder,
                dimension_calls: AtomicUsize::new(0),
                placeholder_calls: AtomicUsize::new(0),
                requested_urls: Mutex::new(Vec::new()),
            }
        }

        /// Total calls across both operations.
        pub fn total_calls(&self) -> usize {
            self.dimension_calls.load(Ordering::SeqCst)
                + self.placeholder_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataProviderPort for StubMetadataProvider {
        async fn fetch_dimensions(&self, url: &str) -> ProviderResult<ImageDimensions> {
            self.dimension_calls.fetch_add(1, Ordering::SeqCst);
            self.requested_urls.lock().unwrap().push(url.to_string());
            self.dimensions
                .ok_or_else(|| ProviderError::Network("stub failure".to_string()))
        }

        async fn fetch_placeholder(&self, url: &str) -> ProviderResult<String> {
            self.placeholder_calls.fetch_add(1, Ordering::SeqCst);
            self.requested_urls.lock().unwrap().push(url.to_string());
            self.placeholder
                .clone()
                .ok_or_else(|| ProviderError::Network("stub failure".to_string()))
        }
    }
}
