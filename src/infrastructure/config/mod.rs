//! Pipeline configuration.

pub mod pipeline_config;

pub use pipeline_config::{PipelineConfig, ServiceConfig, default_cache_location};
