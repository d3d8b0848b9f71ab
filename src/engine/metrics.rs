//! Per-edit performance metrics

use crate::cache::CacheStats;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metrics for one `apply_edit` call
///
/// `recompute_ratio` is the key efficiency figure: the fraction of the buffer
/// that had to be regenerated for this edit. A late edit on a short suffix
/// approaches 0; an edit touching frame 0 is the worst case at 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMetrics {
    /// Edit this measurement belongs to
    pub edit_id: Uuid,

    /// Wall-clock latency of the edit
    pub latency_ms: f64,

    /// Number of frames regenerated
    pub frames_recomputed: usize,

    /// Total frames in the buffer
    pub frames_total: usize,

    /// frames_recomputed / frames_total
    pub recompute_ratio: f64,

    /// Frames regenerated with all dependencies cached
    pub fast_path_frames: usize,

    /// Frames regenerated without cached dependency context
    pub slow_path_frames: usize,

    /// Estimated speedup over the declared full-recompute baseline
    pub speedup: f64,

    /// Cache statistics snapshot taken after the edit
    pub cache: CacheStats,
}

impl std::fmt::Display for EditMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "edit {}: {:.1}ms, {}/{} frames recomputed ({:.1}%), {:.1}x speedup, hit rate {:.1}%",
            self.edit_id,
            self.latency_ms,
            self.frames_recomputed,
            self.frames_total,
            self.recompute_ratio * 100.0,
            self.speedup,
            self.cache.hit_rate * 100.0
        )
    }
}
