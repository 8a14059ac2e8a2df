//! Application layer with enrichment services and the pipeline orchestrator.

/// Pipeline orchestration.
pub mod pipeline;
/// Pure enrichment services.
pub mod services;

pub use pipeline::{ImagePipeline, RenderDecision};
pub use services::{
    EligibilityFilter, LayoutHints, build_markup, build_srcset, parse_descriptor,
};
