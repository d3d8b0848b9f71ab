//! Cache invalidation events
//!
//! Invalidation here is always explicit: the engine computes the downstream
//! closure of an edit and removes exactly those keys. Events record what was
//! removed and why, for structured logging and observability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason for cache invalidation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidationReason {
    /// Downstream closure of an edit operation
    Edit { edit_id: String },

    /// Manual invalidation by key set
    Manual,

    /// Evicted to make room under the capacity limit
    Capacity,
}

impl std::fmt::Display for InvalidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidationReason::Edit { edit_id } => write!(f, "edit {}", edit_id),
            InvalidationReason::Manual => write!(f, "manual invalidation"),
            InvalidationReason::Capacity => write!(f, "capacity eviction"),
        }
    }
}

/// Record of one invalidation batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationEvent {
    /// Reason for invalidation
    pub reason: InvalidationReason,

    /// When the invalidation occurred
    pub timestamp: DateTime<Utc>,

    /// Keys that were invalidated
    pub keys: Vec<String>,

    /// Additional context
    pub context: Option<String>,
}

impl InvalidationEvent {
    /// Create a new invalidation event
    pub fn new(reason: InvalidationReason, keys: Vec<String>) -> Self {
        Self {
            reason,
            timestamp: Utc::now(),
            keys,
            context: None,
        }
    }

    /// Add context to the event
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        let reason = InvalidationReason::Edit {
            edit_id: "e-123".to_string(),
        };
        assert_eq!(reason.to_string(), "edit e-123");

        assert_eq!(InvalidationReason::Manual.to_string(), "manual invalidation");
        assert_eq!(InvalidationReason::Capacity.to_string(), "capacity eviction");
    }

    #[test]
    fn test_event_construction() {
        let event = InvalidationEvent::new(
            InvalidationReason::Manual,
            vec!["frame_1".to_string(), "frame_2".to_string()],
        )
        .with_context("test context".to_string());

        assert_eq!(event.keys.len(), 2);
        assert_eq!(event.context, Some("test context".to_string()));
        assert!(matches!(event.reason, InvalidationReason::Manual));
    }

    #[test]
    fn test_event_serialization() {
        let event = InvalidationEvent::new(
            InvalidationReason::Edit {
                edit_id: "abc".to_string(),
            },
            vec!["frame_0".to_string()],
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("frame_0"));

        let back: InvalidationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys, vec!["frame_0".to_string()]);
    }
}
