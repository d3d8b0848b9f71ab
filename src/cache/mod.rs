//! # Temporal Activation Cache
//!
//! A capacity-bounded store for per-frame activation buffers, trading memory
//! for recomputation avoidance during interactive editing.
//!
//! ## Features
//!
//! - **Byte-based capacity**: the sum of cached buffer sizes never exceeds the
//!   configured limit after any mutating operation
//! - **Pluggable eviction**: LRU (oldest last-access) or LFU (smallest hit
//!   count), selected at construction
//! - **Explicit invalidation**: dependency-aware key sets computed by the
//!   engine; invalidation is idempotent and never an error
//! - **Graceful degradation**: a buffer larger than the whole cache is logged
//!   and discarded rather than failing the caller
//! - **Metrics**: cumulative hit/miss/eviction counters with snapshot access
//!
//! ## Example
//!
//! ```rust
//! use temporal_cache::cache::{CacheConfig, TemporalCache};
//! use std::collections::HashSet;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = CacheConfig::builder()
//!     .max_size_bytes(100 * 1024 * 1024) // 100 MB
//!     .build();
//!
//! let mut cache = TemporalCache::new(config)?;
//!
//! // Store a frame's activations
//! cache.put("frame_0".to_string(), vec![0.0; 512], HashSet::new());
//!
//! // Retrieve a shared read-only view
//! if let Some(samples) = cache.get("frame_0") {
//!     println!("cache hit: {} samples", samples.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod invalidation;
pub mod keys;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder, EvictionPolicy};
pub use entry::CacheEntry;
pub use invalidation::{InvalidationEvent, InvalidationReason};
pub use keys::{frame_index, frame_key};
pub use store::TemporalCache;
pub use types::{ActivationBuffer, CacheKey, CacheStats};
