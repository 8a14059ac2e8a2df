//! Per-reference enrichment orchestration.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use tracing::{debug, trace, warn};

use crate::application::services::{
    EligibilityFilter, LayoutHints, build_markup, build_srcset, parse_descriptor,
};
use crate::domain::entities::{ImageMetadata, ImageReference};
use crate::domain::ports::{MetadataProviderPort, ProviderResult};
use crate::infrastructure::cache::{CacheStats, MetadataCache};
use crate::infrastructure::config::PipelineConfig;
use crate::infrastructure::metadata::{HttpMetadataProvider, canonical_url};

/// Outcome of processing one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision {
    /// Replacement markup for the reference.
    Markup(String),
    /// Use the host's own unmodified rendering.
    Passthrough,
}

impl RenderDecision {
    /// Returns true when the host should keep its default rendering.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        matches!(self, Self::Passthrough)
    }

    /// Returns the markup, if any.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Markup(m) => Some(m),
            Self::Passthrough => None,
        }
    }
}

/// Orchestrates enrichment of image references.
///
/// Holds the eligibility gate, the metadata cache, the remote provider and
/// the document-wide eager-loading counter. One pipeline instance serves one
/// document-rendering process; the host calls [`Self::start`] before the
/// first reference and [`Self::shutdown`] when the document is done.
pub struct ImagePipeline {
    config: PipelineConfig,
    filter: EligibilityFilter,
    provider: Arc<dyn MetadataProviderPort>,
    cache: Option<MetadataCache>,
    enriched: AtomicUsize,
}

impl std::fmt::Debug for ImagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ImagePipeline {
    /// Creates a pipeline with an injected metadata provider.
    #[must_use]
    pub fn new(config: PipelineConfig, provider: Arc<dyn MetadataProviderPort>) -> Self {
        let filter = EligibilityFilter::from_config(&config);
        let cache = config.cache_path.clone().map(MetadataCache::new);

        Self {
            config,
            filter,
            provider,
            cache,
            enriched: AtomicUsize::new(0),
        }
    }

    /// Creates a pipeline backed by the HTTP metadata provider.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_http_provider(config: PipelineConfig) -> ProviderResult<Self> {
        let provider = Arc::new(HttpMetadataProvider::new(&config.service)?);
        Ok(Self::new(config, provider))
    }

    /// Hydrates the metadata cache. Idempotent; [`Self::render`] also
    /// hydrates lazily, so calling this is an optimization, not a
    /// requirement.
    pub async fn start(&self) {
        if let Some(cache) = &self.cache {
            cache.load().await;
        }
    }

    /// Processes one image reference.
    ///
    /// Ineligible references, and references whose dimensions cannot be
    /// determined, fall back to [`RenderDecision::Passthrough`]; no failure
    /// here ever aborts the surrounding document.
    pub async fn render(&self, reference: &ImageReference) -> RenderDecision {
        if !self.filter.is_eligible(&reference.url) {
            trace!(url = %reference.url, "Reference not eligible, passing through");
            return RenderDecision::Passthrough;
        }

        let canonical = canonical_url(&reference.url);
        let Some(metadata) = self.lookup(canonical).await else {
            return RenderDecision::Passthrough;
        };

        let descriptor = parse_descriptor(&reference.alt);
        let srcset = build_srcset(&reference.url, metadata.width, &self.config.widths);

        let position = self.enriched.fetch_add(1, Ordering::SeqCst) + 1;
        let layout = LayoutHints {
            sizes: self.config.sizes.clone(),
            eager: position <= self.config.eager_count,
        };

        RenderDecision::Markup(build_markup(
            &descriptor,
            &reference.url,
            &metadata,
            &srcset,
            &layout,
        ))
    }

    /// Processes a whole document's references concurrently.
    ///
    /// Results are positional: index `i` of the output corresponds to index
    /// `i` of the input, regardless of internal completion order.
    pub async fn render_document(&self, references: &[ImageReference]) -> Vec<RenderDecision> {
        join_all(references.iter().map(|r| self.render(r))).await
    }

    /// Flushes the metadata cache if it is dirty. Best-effort: a failed
    /// flush is logged, never fatal.
    pub async fn shutdown(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save().await {
                warn!(error = %e, "Failed to flush metadata cache");
            }
        }
    }

    /// Returns cache statistics, when caching is configured.
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(MetadataCache::stats)
    }

    /// Resolves metadata for a canonical URL: cache first, then both remote
    /// fetches concurrently. Returns None when dimensions are unavailable;
    /// a missing placeholder alone does not block enrichment.
    async fn lookup(&self, canonical: &str) -> Option<ImageMetadata> {
        if let Some(cache) = &self.cache {
            cache.load().await;
            if let Some(metadata) = cache.get(canonical) {
                return Some(metadata);
            }
        }

        let (dimensions, placeholder) = tokio::join!(
            self.provider.fetch_dimensions(canonical),
            self.provider.fetch_placeholder(canonical),
        );

        let dimensions = match dimensions {
            Ok(d) if d.width > 0 && d.height > 0 => d,
            Ok(d) => {
                warn!(url = %canonical, dimensions = %d, "Ignoring non-positive dimensions");
                return None;
            }
            Err(e) => {
                warn!(url = %canonical, error = %e, "Dimension fetch failed, passing through");
                return None;
            }
        };

        let placeholder = match placeholder {
            Ok(p) => p,
            Err(e) => {
                warn!(url = %canonical, error = %e, "Placeholder fetch failed, rendering without one");
                String::new()
            }
        };

        let metadata = ImageMetadata::from_dimensions(dimensions).with_placeholder(placeholder);

        if let Some(cache) = &self.cache {
            cache.set(canonical, metadata.clone());
            debug!(url = %canonical, "Cached freshly fetched metadata");
        }

        Some(metadata)
    }
}
