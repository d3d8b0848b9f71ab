//! # Sparse Inference Engine
//!
//! Coordinates full generation and incremental editing over a sequence of
//! fixed-size audio frames. A full pass builds a linear dependency chain
//! (each frame depends on its causal predecessor) and populates the cache;
//! each edit then invalidates only the downstream closure of the touched
//! frames and regenerates exactly that set, reusing cached dependencies where
//! possible.
//!
//! Recompute work is proportional to the size of the affected region, not to
//! the buffer length: a late edit touching a short suffix regenerates a
//! handful of frames, while an edit at frame 0 is the worst case and
//! regenerates everything downstream.
//!
//! Each engine owns exactly one [`DependencyGraph`] and one [`TemporalCache`];
//! construct one engine per editing session rather than sharing instances.
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
//! // Full pass: builds the dependency chain and fills the cache
//! engine.generate_full("amapiano beat with log drums", 10.0, 44100).await?;
//!
//! // Incremental edit: only downstream frames are regenerated
//! let edit = EditOperation::from_time_range(EditType::Modify, 8.0, 9.0, 44100)?;
//! let (_audio, metrics) = engine.apply_edit(&edit).await?;
//! println!("{}", metrics);
//! # Ok(())
//! # }
//! ```

pub mod edit;
pub mod generation;
pub mod metrics;

pub use edit::{EditOperation, EditType};
pub use generation::{FrameContext, GenerationStep, SeededNoiseGenerator};
pub use metrics::EditMetrics;

use crate::cache::{
    frame_index, frame_key, CacheConfig, CacheStats, InvalidationEvent, InvalidationReason,
    TemporalCache,
};
use crate::error::{Result, TemporalCacheError};
use crate::graph::DependencyGraph;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for the sparse inference engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Samples per frame - the unit of caching and invalidation granularity
    pub frame_size: usize,

    /// Declared cost of regenerating one frame without caching, used as the
    /// baseline for the speedup estimate in edit metrics
    pub baseline_frame_cost: Duration,

    /// Cache configuration
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_size: 512,
            baseline_frame_cost: Duration::from_millis(100),
            cache: CacheConfig::default(),
        }
    }
}

/// Handle for requesting cancellation of an in-flight operation
///
/// Cancellation granularity is per-frame: the request is honored between
/// frame iterations, never mid-frame.
#[derive(Debug, Clone)]
pub struct CancellationHandle(Arc<AtomicBool>);

impl CancellationHandle {
    /// Request cancellation of the current operation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Engine for full generation and incremental, cache-assisted editing
///
/// State machine per call: frames are processed strictly sequentially. On a
/// partial failure or cancellation mid-edit, frames already recomputed are
/// valid and cached; frames not yet reached keep their pre-edit samples in
/// the buffer but are invalidated in the cache, so the caller must retry the
/// edit or regenerate fully.
pub struct SparseInferenceEngine<G: GenerationStep> {
    config: EngineConfig,
    generator: G,
    graph: DependencyGraph,
    cache: TemporalCache,

    audio: Vec<f32>,
    num_frames: usize,
    prompt: String,
    initialized: bool,

    cancel: Arc<AtomicBool>,
}

impl<G: GenerationStep> SparseInferenceEngine<G> {
    /// Create a new engine with its own graph and cache
    pub fn new(config: EngineConfig, generator: G) -> Result<Self> {
        if config.frame_size == 0 {
            return Err(TemporalCacheError::Config(
                "frame_size must be greater than 0".to_string(),
            ));
        }

        let cache = TemporalCache::new(config.cache.clone())?;

        info!(frame_size = config.frame_size, "sparse inference engine initialized");

        Ok(Self {
            config,
            generator,
            graph: DependencyGraph::new(),
            cache,
            audio: Vec::new(),
            num_frames: 0,
            prompt: String::new(),
            initialized: false,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for cancelling the current operation between frames
    pub fn cancellation_handle(&self) -> CancellationHandle {
        CancellationHandle(self.cancel.clone())
    }

    /// Generate the full audio buffer from scratch
    ///
    /// Replaces the engine's buffer, builds the frame dependency chain and
    /// populates the cache. This is the only path that adds graph edges;
    /// edits only invalidate and recompute existing nodes. Samples past the
    /// last whole frame stay zeroed and are outside caching granularity.
    pub async fn generate_full(
        &mut self,
        prompt: &str,
        duration_seconds: f64,
        sample_rate: u32,
    ) -> Result<&[f32]> {
        self.cancel.store(false, Ordering::Relaxed);

        let frame_size = self.config.frame_size;
        let num_samples = (duration_seconds * sample_rate as f64) as usize;
        let num_frames = num_samples / frame_size;

        info!(duration_seconds, sample_rate, num_frames, "full generation started");
        let started = Instant::now();

        // A fresh pass replaces all cached content; entries from a previous,
        // possibly longer buffer must not survive as stale frames
        self.cache.clear();

        let mut audio = vec![0.0f32; num_samples];

        for i in 0..num_frames {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(TemporalCacheError::Cancelled {
                    frames_completed: i,
                    frames_requested: num_frames,
                });
            }

            let previous = if i > 0 {
                Some(&audio[(i - 1) * frame_size..i * frame_size])
            } else {
                None
            };

            let samples = self
                .generator
                .generate_frame(FrameContext {
                    index: i,
                    frame_size,
                    prompt,
                    previous,
                })
                .await?;

            if samples.len() != frame_size {
                return Err(TemporalCacheError::FrameSizeMismatch {
                    expected: frame_size,
                    actual: samples.len(),
                });
            }

            audio[i * frame_size..(i + 1) * frame_size].copy_from_slice(&samples);

            let key = frame_key(i);
            let mut dependencies = HashSet::new();
            if i > 0 {
                let prev_key = frame_key(i - 1);
                self.graph.add_dependency(&key, &prev_key);
                dependencies.insert(prev_key);
            }

            self.cache.put(key, samples, dependencies);
        }

        self.audio = audio;
        self.num_frames = num_frames;
        self.prompt = prompt.to_string();
        self.initialized = true;

        info!(
            num_frames,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "full generation complete"
        );

        Ok(&self.audio)
    }

    /// Apply an edit, regenerating only the affected downstream frames
    ///
    /// Returns the updated buffer and per-edit metrics. Region bounds past
    /// the buffer end are clamped to the last valid frame; a sub-frame edit
    /// still recomputes at least the one frame it lands in.
    pub async fn apply_edit(&mut self, edit: &EditOperation) -> Result<(&[f32], EditMetrics)> {
        if !self.initialized {
            return Err(TemporalCacheError::Uninitialized);
        }

        self.cancel.store(false, Ordering::Relaxed);
        let started = Instant::now();
        let frame_size = self.config.frame_size;

        info!(
            edit_id = %edit.edit_id,
            edit_type = %edit.edit_type,
            start_time = edit.start_time,
            end_time = edit.end_time,
            "applying edit"
        );

        if self.num_frames == 0 {
            // Buffer shorter than one frame: nothing is cached or editable
            let metrics = self.build_metrics(edit, started.elapsed(), 0, 0, 0);
            return Ok((&self.audio, metrics));
        }

        let last_frame = self.num_frames - 1;
        let (start_sample, end_sample) = edit.affected_region;
        let start_frame = (start_sample / frame_size).min(last_frame);
        let end_frame = (end_sample / frame_size).min(last_frame);

        let changed: HashSet<String> = (start_frame..=end_frame).map(frame_key).collect();
        let affected = self.graph.get_affected_nodes(&changed);

        let removed = self.cache.invalidate(&affected);
        let event = InvalidationEvent::new(
            InvalidationReason::Edit {
                edit_id: edit.edit_id.to_string(),
            },
            affected.iter().cloned().collect(),
        )
        .with_context(format!("{} cached entries removed", removed));
        debug!(
            directly_changed = changed.len(),
            affected = affected.len(),
            removed,
            "invalidated downstream closure"
        );
        debug!(event = ?event, "invalidation event");

        // Ascending index order so a recomputed frame's predecessor is always
        // recomputed and re-cached before the frame itself. Graph edges are
        // never removed, so a prior longer pass can leave downstream nodes
        // past the current buffer; those have nothing to recompute into.
        let mut order: Vec<usize> = affected
            .iter()
            .filter_map(|k| frame_index(k))
            .filter(|&idx| idx < self.num_frames)
            .collect();
        order.sort_unstable();

        let mut fast_path_frames = 0;
        let mut slow_path_frames = 0;

        for (done, &idx) in order.iter().enumerate() {
            if self.cancel.load(Ordering::Relaxed) {
                return Err(TemporalCacheError::Cancelled {
                    frames_completed: done,
                    frames_requested: order.len(),
                });
            }

            let key = frame_key(idx);
            let dependencies = self.graph.get_dependencies(&key);

            // Fetch dependency buffers through the cache so hit/miss counters
            // reflect fast-path degradation
            let mut dep_context = None;
            let mut all_cached = true;
            for dep in &dependencies {
                match self.cache.get(dep) {
                    Some(buffer) => {
                        let dep_idx = frame_index(dep).unwrap_or(0);
                        let newer = match &dep_context {
                            Some((best_idx, _)) => dep_idx > *best_idx,
                            None => true,
                        };
                        if newer {
                            dep_context = Some((dep_idx, buffer));
                        }
                    }
                    None => all_cached = false,
                }
            }

            let previous = if all_cached {
                fast_path_frames += 1;
                dep_context.as_ref().map(|(_, buffer)| buffer.as_slice())
            } else {
                // Slow path: regenerate without cached context
                slow_path_frames += 1;
                debug!(key = key.as_str(), "dependency not cached, slow-path recompute");
                None
            };

            let samples = self
                .generator
                .generate_frame(FrameContext {
                    index: idx,
                    frame_size,
                    prompt: &self.prompt,
                    previous,
                })
                .await?;

            if samples.len() != frame_size {
                return Err(TemporalCacheError::FrameSizeMismatch {
                    expected: frame_size,
                    actual: samples.len(),
                });
            }

            self.audio[idx * frame_size..(idx + 1) * frame_size].copy_from_slice(&samples);
            self.cache.put(key, samples, dependencies);
        }

        let metrics = self.build_metrics(
            edit,
            started.elapsed(),
            order.len(),
            fast_path_frames,
            slow_path_frames,
        );

        info!(%metrics, "edit applied");

        Ok((&self.audio, metrics))
    }

    /// The engine's current audio buffer
    pub fn current_audio(&self) -> &[f32] {
        &self.audio
    }

    /// Number of whole frames in the current buffer
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Snapshot of the cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The engine's dependency graph
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Human-readable summary of cache, graph and buffer state with
    /// sizing recommendations
    pub fn performance_report(&self) -> String {
        let stats = self.cache.stats();

        let mut report = format!(
            "Sparse inference report\n\
             cache: {}\n\
             graph: {} nodes, {} edges\n\
             buffer: {} frames x {} samples\n",
            stats,
            self.graph.node_count(),
            self.graph.edge_count(),
            self.num_frames,
            self.config.frame_size,
        );

        if stats.hit_rate < 0.5 && stats.hits + stats.misses > 0 {
            report.push_str("warning: low cache hit rate, consider increasing cache size\n");
        }
        if stats.utilization > 0.9 {
            report.push_str("warning: high cache utilization, consider increasing cache size\n");
        }
        if stats.evictions > stats.hits {
            report.push_str("warning: evictions exceed hits, cache thrashing likely\n");
        }

        report
    }

    fn build_metrics(
        &self,
        edit: &EditOperation,
        elapsed: Duration,
        frames_recomputed: usize,
        fast_path_frames: usize,
        slow_path_frames: usize,
    ) -> EditMetrics {
        let recompute_ratio = if self.num_frames > 0 {
            frames_recomputed as f64 / self.num_frames as f64
        } else {
            0.0
        };

        let baseline = self.config.baseline_frame_cost.as_secs_f64() * frames_recomputed as f64;
        let elapsed_secs = elapsed.as_secs_f64();
        let speedup = if elapsed_secs > 0.0 {
            baseline / elapsed_secs
        } else {
            1.0
        };

        EditMetrics {
            edit_id: edit.edit_id,
            latency_ms: elapsed_secs * 1000.0,
            frames_recomputed,
            frames_total: self.num_frames,
            recompute_ratio,
            fast_path_frames,
            slow_path_frames,
            speedup,
            cache: self.cache.stats(),
        }
    }
}
