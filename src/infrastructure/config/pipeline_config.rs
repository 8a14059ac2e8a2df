//! Pipeline configuration with serde-resolved defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

const APP_NAME: &str = "oxipix";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Configuration for the enrichment pipeline.
///
/// Every field is optional in serialized form and resolves to a default, so
/// an empty document yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Master switch for the enrichment path. When false every reference
    /// falls back to the host's unmodified rendering.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Candidate widths for the `srcset` descriptor.
    #[serde(default = "default_widths")]
    pub widths: Vec<u32>,

    /// Value of the `sizes` attribute on enriched images.
    #[serde(default = "default_sizes")]
    pub sizes: String,

    /// Hostname allow-list; a single `*` per pattern matches any substring.
    /// Empty list allows every host.
    #[serde(default)]
    pub allowed_domains: Vec<String>,

    /// Path extensions excluded from enrichment.
    #[serde(default = "default_ignored_formats")]
    pub ignored_formats: Vec<String>,

    /// Number of leading images that load eagerly with high priority.
    #[serde(default = "default_eager_count")]
    pub eager_count: usize,

    /// Backing file for the metadata cache. None disables caching.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Remote image service settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Remote image service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the image service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Width of the requested placeholder, in pixels.
    #[serde(default = "default_placeholder_width")]
    pub placeholder_width: u32,

    /// Blur radius applied to the requested placeholder.
    #[serde(default = "default_placeholder_blur")]
    pub placeholder_blur: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_widths() -> Vec<u32> {
    vec![320, 640, 960, 1280, 1920]
}

fn default_sizes() -> String {
    "100vw".to_string()
}

fn default_ignored_formats() -> Vec<String> {
    vec!["svg".to_string(), "gif".to_string()]
}

fn default_eager_count() -> usize {
    1
}

fn default_base_url() -> String {
    "https://images.weserv.nl".to_string()
}

fn default_placeholder_width() -> u32 {
    16
}

fn default_placeholder_blur() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            widths: default_widths(),
            sizes: default_sizes(),
            allowed_domains: Vec::new(),
            ignored_formats: default_ignored_formats(),
            eager_count: default_eager_count(),
            cache_path: None,
            service: ServiceConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            placeholder_width: default_placeholder_width(),
            placeholder_blur: default_placeholder_blur(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file.
    ///
    /// An absent file yields the defaults; an unparseable file is reported
    /// with a warning and also yields the defaults.
    pub async fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path).await else {
            return Self::default();
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable config file, using defaults");
                Self::default()
            }
        }
    }
}

/// Returns the default cache file location
/// (`~/.cache/oxipix/metadata.json`), falling back to the temp directory.
#[must_use]
pub fn default_cache_location() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
        || std::env::temp_dir().join(APP_NAME).join("metadata.json"),
        |dirs| dirs.cache_dir().join("metadata.json"),
    )
}
