//! # temporal-cache
//!
//! Temporal activation caching with dependency-graph-based incremental
//! invalidation, built to sit in front of any expensive, regionally
//! decomposable generation process - here, frame-wise audio generation for
//! real-time interactive editing.
//!
//! ## Components
//!
//! - [`graph::DependencyGraph`] - directed relation recording which frames'
//!   outputs were used to compute which other frames, with downstream-closure
//!   queries for invalidation
//! - [`cache::TemporalCache`] - capacity-bounded activation store with LRU/LFU
//!   eviction, explicit invalidation and hit/miss/eviction metrics
//! - [`engine::SparseInferenceEngine`] - orchestrates a full generation pass
//!   (building the graph and filling the cache) and per-edit selective
//!   regeneration of only the affected frames
//!
//! ## Example
//!
//! ```rust
//! use temporal_cache::engine::{
//!     EditOperation, EditType, EngineConfig, SeededNoiseGenerator, SparseInferenceEngine,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut engine =
//!     SparseInferenceEngine::new(EngineConfig::default(), SeededNoiseGenerator::default())?;
//!
//! let audio = engine.generate_full("warm analog pad", 10.0, 44100).await?;
//! assert_eq!(audio.len(), 441_000);
//!
//! // A late edit regenerates only the trailing frames it affects
//! let edit = EditOperation::from_time_range(EditType::Modify, 9.0, 9.5, 44100)?;
//! let (_audio, metrics) = engine.apply_edit(&edit).await?;
//! assert!(metrics.recompute_ratio < 0.1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Session model
//!
//! Engines are instance-per-session: each owns its graph, cache and audio
//! buffer, and processes frames strictly sequentially within one call.
//! Separate engines are independent and may run concurrently.

pub mod cache;
pub mod engine;
pub mod error;
pub mod graph;

// Re-export main types for convenience
pub use cache::{
    ActivationBuffer, CacheConfig, CacheConfigBuilder, CacheEntry, CacheKey, CacheStats,
    EvictionPolicy, InvalidationEvent, InvalidationReason, TemporalCache,
};
pub use engine::{
    CancellationHandle, EditMetrics, EditOperation, EditType, EngineConfig, FrameContext,
    GenerationStep, SeededNoiseGenerator, SparseInferenceEngine,
};
pub use error::{Result, TemporalCacheError};
pub use graph::DependencyGraph;
