//! Error types for cache and engine operations
//!
//! Normal cache outcomes (misses, invalidating absent keys, a put that cannot
//! fit) are not errors; only structurally invalid usage surfaces here.

use thiserror::Error;

/// Main error type for temporal cache operations
#[derive(Error, Debug)]
pub enum TemporalCacheError {
    /// Invalid configuration (zero capacity, zero frame size, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Edit applied before any full generation pass
    #[error("Engine is uninitialized: apply_edit requires a prior generate_full")]
    Uninitialized,

    /// Structurally malformed edit region
    #[error("Invalid edit region: start {start} >= end {end}")]
    InvalidRegion { start: usize, end: usize },

    /// Generation step returned a buffer of the wrong length
    #[error("Frame size mismatch: expected {expected} samples, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// Operation cancelled between frame iterations
    #[error("Operation cancelled after {frames_completed} of {frames_requested} frames")]
    Cancelled {
        frames_completed: usize,
        frames_requested: usize,
    },

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for cache and engine operations
pub type Result<T> = std::result::Result<T, TemporalCacheError>;

impl From<String> for TemporalCacheError {
    fn from(s: String) -> Self {
        TemporalCacheError::Other(s)
    }
}

impl From<&str> for TemporalCacheError {
    fn from(s: &str) -> Self {
        TemporalCacheError::Other(s.to_string())
    }
}
