//! Cache entry management

use crate::cache::types::{ActivationBuffer, CacheKey};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// A cached activation buffer with access metadata
///
/// The entry owns its buffer; readers receive a shared `Arc` view and must not
/// mutate it. Last-access tracking uses a monotonic clock so LRU ordering is
/// immune to wall-clock adjustments.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cache key
    pub key: CacheKey,

    /// The cached activation samples
    pub activations: ActivationBuffer,

    /// Keys this entry was computed from
    pub dependencies: HashSet<CacheKey>,

    /// Last access time (for LRU ordering)
    pub last_access: Instant,

    /// Number of successful reads (for LFU ordering)
    pub hit_count: u64,

    /// Byte footprint of the activation buffer
    pub size_bytes: usize,
}

impl CacheEntry {
    /// Create a new cache entry, taking ownership of the samples
    pub fn new(key: CacheKey, activations: Vec<f32>, dependencies: HashSet<CacheKey>) -> Self {
        let size_bytes = buffer_size_bytes(&activations);

        Self {
            key,
            activations: Arc::new(activations),
            dependencies,
            last_access: Instant::now(),
            hit_count: 0,
            size_bytes,
        }
    }

    /// Mark the entry as accessed (updates access time and hit count)
    pub fn mark_accessed(&mut self) {
        self.last_access = Instant::now();
        self.hit_count += 1;
    }
}

/// Byte footprint of a sample buffer
pub fn buffer_size_bytes(samples: &[f32]) -> usize {
    samples.len() * std::mem::size_of::<f32>()
}
