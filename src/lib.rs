//! Oxipix - a responsive-image enrichment pipeline.
//!
//! This crate takes remote image references from a host document renderer,
//! fetches original pixel dimensions and a low-resolution placeholder from a
//! remote image service (cache-first), and assembles replacement markup with
//! a `srcset` descriptor and lazy-loading hints. Every failure path degrades
//! to the host's own unmodified rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing pure services and the pipeline orchestrator.
pub mod application;
/// Domain layer containing entities and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for the remote service and cache.
pub mod infrastructure;

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "oxipix";

pub use application::{ImagePipeline, RenderDecision};
pub use domain::entities::{ImageDimensions, ImageMetadata, ImageReference, ParsedDescriptor};
pub use domain::ports::{MetadataProviderPort, ProviderError, ProviderResult};
pub use infrastructure::{
    CacheStats, HttpMetadataProvider, MetadataCache, PipelineConfig, ServiceConfig,
};
