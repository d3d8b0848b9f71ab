//! Main cache store implementation with policy-based eviction
//!
//! The store is a capacity-bounded key -> activation map. It is synchronous
//! and `&mut self`: each inference engine exclusively owns its cache, so there
//! is no shared-state locking here. A miss is an ordinary outcome, not an
//! error, which makes cache consultation always safe to call unconditionally.

use crate::cache::{
    config::{CacheConfig, EvictionPolicy},
    entry::{buffer_size_bytes, CacheEntry},
    types::{ActivationBuffer, CacheKey, CacheStats},
};
use crate::error::{Result, TemporalCacheError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Activation cache with LRU/LFU eviction and explicit invalidation
///
/// Entry lifecycle: absent -> present -> (evicted | invalidated) -> absent.
pub struct TemporalCache {
    config: CacheConfig,

    /// Main storage: key -> entry
    entries: HashMap<CacheKey, CacheEntry>,

    /// Total size of cached data in bytes
    current_size_bytes: usize,

    // Cumulative process-wide statistics; survive clear()
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl TemporalCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate().map_err(TemporalCacheError::Config)?;

        info!(
            max_size_bytes = config.max_size_bytes,
            policy = %config.eviction_policy,
            "temporal cache initialized"
        );

        Ok(Self {
            config,
            entries: HashMap::new(),
            current_size_bytes: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Get cached activations for a key
    ///
    /// On hit, refreshes the entry's last-access time and hit count and
    /// returns a shared read-only buffer. On miss, returns `None`.
    ///
    /// Per-entry access metadata is always maintained (the eviction policies
    /// order by it); only the cumulative counters honor `enable_metrics`.
    pub fn get(&mut self, key: &str) -> Option<ActivationBuffer> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.mark_accessed();
                if self.config.enable_metrics {
                    self.hits += 1;
                }
                debug!(key, "cache hit");
                Some(entry.activations.clone())
            }
            None => {
                if self.config.enable_metrics {
                    self.misses += 1;
                }
                debug!(key, "cache miss");
                None
            }
        }
    }

    /// Check if a key is present (without touching access metadata)
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store activations, evicting per the configured policy if needed
    ///
    /// A buffer that cannot fit even in an empty cache is logged and
    /// discarded; the cache never grows past its capacity.
    pub fn put(&mut self, key: CacheKey, activations: Vec<f32>, dependencies: HashSet<CacheKey>) {
        let size_bytes = buffer_size_bytes(&activations);

        // Replacing a key frees its old footprint first
        if let Some(old) = self.entries.remove(&key) {
            self.current_size_bytes -= old.size_bytes;
        }

        while self.current_size_bytes + size_bytes > self.config.max_size_bytes {
            if self.entries.is_empty() {
                warn!(
                    key = key.as_str(),
                    size_bytes,
                    max_size_bytes = self.config.max_size_bytes,
                    "activation buffer larger than cache capacity, discarding put"
                );
                return;
            }
            self.evict_one();
        }

        debug!(
            key = key.as_str(),
            size_bytes,
            total = self.current_size_bytes + size_bytes,
            "cached"
        );

        self.current_size_bytes += size_bytes;
        self.entries
            .insert(key.clone(), CacheEntry::new(key, activations, dependencies));
    }

    /// Invalidate a set of keys, returning how many entries were removed
    ///
    /// Absent keys are no-ops; calling this twice with the same set leaves the
    /// cache in the same state as calling it once.
    pub fn invalidate(&mut self, keys: &HashSet<CacheKey>) -> usize {
        let mut removed = 0;

        for key in keys {
            if let Some(entry) = self.entries.remove(key) {
                self.current_size_bytes -= entry.size_bytes;
                removed += 1;
                debug!(key = key.as_str(), "invalidated");
            }
        }

        removed
    }

    /// Drop all entries and reset the running size
    ///
    /// Hit/miss/eviction counters are cumulative statistics and are kept.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.current_size_bytes = 0;
        info!(count, "cache cleared");
    }

    /// Get a statistics snapshot
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            hit_rate: CacheStats::compute_hit_rate(self.hits, self.misses),
            evictions: self.evictions,
            entries: self.entries.len(),
            current_size_bytes: self.current_size_bytes,
            max_size_bytes: self.config.max_size_bytes,
            utilization: self.current_size_bytes as f64 / self.config.max_size_bytes as f64,
        }
    }

    /// Number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current total size of cached data in bytes
    pub fn size_bytes(&self) -> usize {
        self.current_size_bytes
    }

    /// Internal: evict one entry per the configured policy
    ///
    /// Ties break on the lexicographically smallest key so eviction order is
    /// deterministic and reproducible.
    fn evict_one(&mut self) {
        let victim = match self.config.eviction_policy {
            EvictionPolicy::Lru => self
                .entries
                .values()
                .min_by(|a, b| {
                    a.last_access
                        .cmp(&b.last_access)
                        .then_with(|| a.key.cmp(&b.key))
                })
                .map(|e| e.key.clone()),
            EvictionPolicy::Lfu => self
                .entries
                .values()
                .min_by(|a, b| {
                    a.hit_count
                        .cmp(&b.hit_count)
                        .then_with(|| a.key.cmp(&b.key))
                })
                .map(|e| e.key.clone()),
        };

        if let Some(key) = victim {
            if let Some(entry) = self.entries.remove(&key) {
                self.current_size_bytes -= entry.size_bytes;
                if self.config.enable_metrics {
                    self.evictions += 1;
                }
                debug!(key = key.as_str(), policy = %self.config.eviction_policy, "evicted");
            }
        }
    }
}
