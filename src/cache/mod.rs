//! Caching subsystem.
//!
//! Two independent instances of [`ObjectCache`]:
//!
//! - [`PlaceCache`]: resolved [`PlaceRecord`]s keyed on place id, bounded
//!   by entry count.
//! - [`ImageCache`]: fetched [`Image`]s keyed on
//!   [`PhotoReference::cache_key_for()`](crate::PhotoReference::cache_key_for),
//!   bounded by an approximate byte budget.
//!
//! Both are best-effort: moka may evict any entry at any time once the bound
//! is reached (TinyLFU admission with LRU eviction), so callers treat a miss
//! as a normal outcome. This approximates a memory-pressure-aware object
//! cache; it does not react to actual system memory pressure.

use std::fmt;

use crate::telemetry;
use crate::types::{Image, PlaceRecord};

/// Default maximum number of entries in the place cache.
const DEFAULT_PLACE_CACHE_MAX: u64 = 500;

/// Default byte budget for the image cache (64 MiB).
const DEFAULT_IMAGE_CACHE_BYTES: u64 = 64 * 1024 * 1024;

/// Bounds for the place and image caches.
///
/// ```rust
/// # use sightseer::CacheConfig;
/// let config = CacheConfig::new()
///     .place_max_entries(1_000)
///     .image_max_bytes(16 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached places. Default: 500.
    pub place_max_entries: u64,
    /// Approximate total bytes of cached images. Default: 64 MiB.
    pub image_max_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            place_max_entries: DEFAULT_PLACE_CACHE_MAX,
            image_max_bytes: DEFAULT_IMAGE_CACHE_BYTES,
        }
    }
}

impl CacheConfig {
    /// Create a config with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached places.
    pub fn place_max_entries(mut self, n: u64) -> Self {
        self.place_max_entries = n;
        self
    }

    /// Set the approximate byte budget for cached images.
    pub fn image_max_bytes(mut self, n: u64) -> Self {
        self.image_max_bytes = n;
        self
    }
}

/// Thread-safe string-keyed store holding values of a single type.
///
/// No ordering or enumeration is exposed. `set` always succeeds, `get` never
/// blocks, and `clear` is immediate: once it returns, no earlier entry is
/// observable.
pub struct ObjectCache<V> {
    name: &'static str,
    entries: moka::sync::Cache<String, V>,
}

impl<V> ObjectCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache bounded by entry count.
    pub fn with_max_entries(name: &'static str, max: u64) -> Self {
        Self {
            name,
            entries: moka::sync::Cache::new(max),
        }
    }

    /// Create a cache bounded by the summed weight of its values.
    pub fn with_weigher<W>(name: &'static str, max_weight: u64, weigher: W) -> Self
    where
        W: Fn(&V) -> u32 + Send + Sync + 'static,
    {
        let entries = moka::sync::Cache::builder()
            .max_capacity(max_weight)
            .weigher(move |_key: &String, value: &V| weigher(value))
            .build();
        Self { name, entries }
    }

    /// Name used in logs and the `cache` metric label.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, value: V, key: impl Into<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Look up `key`.
    ///
    /// Returns `None` on miss. Emits cache hit/miss metrics.
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.entries.get(key);
        let metric = if value.is_some() {
            telemetry::CACHE_HITS_TOTAL
        } else {
            telemetry::CACHE_MISSES_TOTAL
        };
        metrics::counter!(metric, "cache" => self.name).increment(1);
        value
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Approximate number of live entries.
    ///
    /// May lag behind recent inserts and evictions.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed weight of live entries: bytes for the image cache, entry
    /// count for an unweighted cache.
    pub fn weighted_size(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.weighted_size()
    }
}

impl<V> fmt::Debug for ObjectCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCache")
            .field("name", &self.name)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

/// Places keyed on provider place id.
pub type PlaceCache = ObjectCache<PlaceRecord>;

/// Images keyed on photo reference hash.
pub type ImageCache = ObjectCache<Image>;

impl ObjectCache<PlaceRecord> {
    /// Create the place cache from `config`.
    pub fn places(config: &CacheConfig) -> Self {
        Self::with_max_entries("place", config.place_max_entries)
    }
}

impl ObjectCache<Image> {
    /// Create the image cache from `config`, weighing entries by byte size.
    pub fn images(config: &CacheConfig) -> Self {
        Self::with_weigher("image", config.image_max_bytes, |image: &Image| {
            u32::try_from(image.len()).unwrap_or(u32::MAX)
        })
    }
}
