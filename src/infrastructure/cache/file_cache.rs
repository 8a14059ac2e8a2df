//! File-backed metadata cache with dirty tracking.
//!
//! A flat map from decoded canonical URL to [`ImageMetadata`], persisted as
//! one pretty-printed JSON object. The in-memory map is the source of truth
//! for the process lifetime; the file is a snapshot written only when the
//! map has been mutated since the last snapshot.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::domain::entities::ImageMetadata;
use crate::infrastructure::metadata::cache_key;

/// Result type for cache persistence operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while persisting the cache.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// I/O error reading or writing the backing file.
    #[error("IO error: {0}")]
    Io(String),
    /// The map could not be serialized.
    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Persisted key-value cache for image metadata.
///
/// `get`/`set` are synchronous over the in-memory map; `load`/`save` are the
/// only suspension points. Keys are canonicalized (query stripped, then
/// percent-decoded) on every access, so callers may pass either form.
pub struct MetadataCache {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, ImageMetadata>>,
    hydrated: OnceCell<()>,
    dirty: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataCache")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MetadataCache {
    /// Creates a cache backed by the given file. No I/O happens until
    /// [`Self::load`].
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(BTreeMap::new()),
            hydrated: OnceCell::new(),
            dirty: AtomicBool::new(false),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Hydrates the map from the backing file.
    ///
    /// Runs at most once per cache instance; concurrent and repeated calls
    /// are idempotent. An absent or unparseable file yields an empty map,
    /// not an error.
    pub async fn load(&self) {
        self.hydrated
            .get_or_init(|| async {
                let content = match fs::read_to_string(&self.path).await {
                    Ok(content) => content,
                    Err(e) => {
                        debug!(path = %self.path.display(), error = %e, "No cache file, starting empty");
                        return;
                    }
                };

                match serde_json::from_str::<BTreeMap<String, ImageMetadata>>(&content) {
                    Ok(map) => {
                        let count = map.len();
                        *self.entries.write() = map;
                        debug!(path = %self.path.display(), entries = count, "Loaded metadata cache");
                    }
                    Err(e) => {
                        warn!(path = %self.path.display(), error = %e, "Unparseable cache file, starting empty");
                    }
                }
            })
            .await;
    }

    /// Returns the stored metadata for a URL, if any.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<ImageMetadata> {
        let key = cache_key(url);
        let entries = self.entries.read();
        if let Some(meta) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Cache hit");
            Some(meta.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Cache miss");
            None
        }
    }

    /// Stores metadata for a URL.
    ///
    /// Writes only when the value differs from the stored one, so repeated
    /// identical sets never mark the store dirty a second time.
    pub fn set(&self, url: &str, value: ImageMetadata) {
        let key = cache_key(url);
        let mut entries = self.entries.write();
        if entries.get(&key) == Some(&value) {
            return;
        }
        debug!(key = %key, "Storing metadata in cache");
        entries.insert(key, value);
        self.dirty.store(true, Ordering::Release);
    }

    /// Writes the map to the backing file if it has been mutated since the
    /// last snapshot.
    ///
    /// A failed write leaves the dirty flag set so a later attempt retries.
    ///
    /// # Errors
    /// Returns error if the file cannot be serialized or written.
    pub async fn save(&self) -> CacheResult<()> {
        if !self.dirty.load(Ordering::Acquire) {
            trace!("Cache clean, skipping save");
            return Ok(());
        }

        let serialized = {
            let entries = self.entries.read();
            serde_json::to_string_pretty(&*entries)
                .map_err(|e| CacheError::Serialize(e.to_string()))?
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {e}")))?;
        }

        fs::write(&self.path, serialized)
            .await
            .map_err(|e| CacheError::Io(format!("Failed to write cache file: {e}")))?;

        self.dirty.store(false, Ordering::Release);
        debug!(path = %self.path.display(), "Saved metadata cache");
        Ok(())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            entries: self.len(),
            dirty: self.dirty.load(Ordering::Acquire),
            hits,
            misses,
            hit_rate,
        }
    }
}

/// Statistics about cache contents and performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries.
    pub entries: usize,
    /// True when the in-memory map has diverged from the last snapshot.
    pub dirty: bool,
    /// Number of lookups that found an entry.
    pub hits: u64,
    /// Number of lookups that found nothing.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} entries{}, {:.1}% hit rate ({} hits, {} misses)",
            self.entries,
            if self.dirty { " (dirty)" } else { "" },
            self.hit_rate,
            self.hits,
            self.misses
        )
    }
}
