//! Core type definitions for the cache system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Cache key type - frame identifiers of the form `frame_<i>`
pub type CacheKey = String;

/// Cached activation buffer - a shared, read-only view of one frame's samples
pub type ActivationBuffer = Arc<Vec<f32>>;

/// Statistics snapshot for cache performance monitoring
///
/// Produced by [`TemporalCache::stats`](crate::cache::TemporalCache::stats).
/// Derived fields (`hit_rate`, `utilization`) are computed at snapshot time so
/// a serialized snapshot is self-contained.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Total number of cache hits
    pub hits: u64,

    /// Total number of cache misses
    pub misses: u64,

    /// Hit rate as a fraction in [0, 1]; 0 when no requests have occurred
    pub hit_rate: f64,

    /// Number of entries evicted by the configured policy
    pub evictions: u64,

    /// Number of entries currently in cache
    pub entries: usize,

    /// Total size of cached data in bytes
    pub current_size_bytes: usize,

    /// Configured capacity in bytes
    pub max_size_bytes: usize,

    /// current_size_bytes / max_size_bytes
    pub utilization: f64,
}

impl CacheStats {
    /// Compute the hit rate for a given hit/miss history
    pub fn compute_hit_rate(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheStats {{ hits: {}, misses: {}, hit_rate: {:.2}%, entries: {}, size: {}/{} bytes, evictions: {} }}",
            self.hits,
            self.misses,
            self.hit_rate * 100.0,
            self.entries,
            self.current_size_bytes,
            self.max_size_bytes,
            self.evictions
        )
    }
}
