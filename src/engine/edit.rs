//! Edit operation value objects
//!
//! An [`EditOperation`] describes one user edit: its type, its region in
//! seconds, and the same region as sample indices. It is an immutable value
//! consumed once per `apply_edit` call. The edit source (UI or API layer) is
//! responsible for validating that the region is well-formed before calling.

use crate::error::{Result, TemporalCacheError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Kind of edit applied to the audio buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditType {
    Insert,
    Delete,
    Modify,
}

impl std::fmt::Display for EditType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditType::Insert => write!(f, "insert"),
            EditType::Delete => write!(f, "delete"),
            EditType::Modify => write!(f, "modify"),
        }
    }
}

/// Descriptor of a single user edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditOperation {
    /// Opaque identifier for this edit
    pub edit_id: Uuid,

    /// Kind of edit
    pub edit_type: EditType,

    /// Edit region start, in seconds
    pub start_time: f64,

    /// Edit region end, in seconds
    pub end_time: f64,

    /// The region as sample indices: (start_sample, end_sample)
    pub affected_region: (usize, usize),

    /// Open parameter bag specific to the edit type
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

impl EditOperation {
    /// Build an edit from a time range, deriving the sample region
    ///
    /// Fails when `start_time >= end_time`; region bounds beyond the buffer
    /// end are permitted here and clamped by the engine.
    pub fn from_time_range(
        edit_type: EditType,
        start_time: f64,
        end_time: f64,
        sample_rate: u32,
    ) -> Result<Self> {
        if start_time >= end_time {
            return Err(TemporalCacheError::InvalidRegion {
                start: (start_time * sample_rate as f64) as usize,
                end: (end_time * sample_rate as f64) as usize,
            });
        }

        let start_sample = (start_time * sample_rate as f64) as usize;
        let end_sample = (end_time * sample_rate as f64) as usize;

        Ok(Self {
            edit_id: Uuid::new_v4(),
            edit_type,
            start_time,
            end_time,
            affected_region: (start_sample, end_sample),
            parameters: HashMap::new(),
        })
    }

    /// Attach a type-specific parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_time_range_derives_samples() {
        let edit = EditOperation::from_time_range(EditType::Modify, 2.0, 3.0, 44100).unwrap();

        assert_eq!(edit.affected_region, (88200, 132300));
        assert_eq!(edit.edit_type, EditType::Modify);
        assert!(edit.parameters.is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = EditOperation::from_time_range(EditType::Delete, 3.0, 2.0, 44100);
        assert!(matches!(
            result,
            Err(TemporalCacheError::InvalidRegion { .. })
        ));

        let result = EditOperation::from_time_range(EditType::Delete, 1.0, 1.0, 44100);
        assert!(result.is_err());
    }

    #[test]
    fn test_parameters() {
        let edit = EditOperation::from_time_range(EditType::Insert, 0.0, 0.5, 48000)
            .unwrap()
            .with_parameter("gain_db", serde_json::json!(-3.0))
            .with_parameter("source", serde_json::json!("log drum"));

        assert_eq!(edit.parameters.len(), 2);
        assert_eq!(edit.parameters["gain_db"], serde_json::json!(-3.0));
    }

    #[test]
    fn test_serde_round_trip() {
        let edit = EditOperation::from_time_range(EditType::Modify, 1.0, 2.0, 44100)
            .unwrap()
            .with_parameter("depth", serde_json::json!(0.8));

        let json = serde_json::to_string(&edit).unwrap();
        assert!(json.contains("\"modify\""));

        let back: EditOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.edit_id, edit.edit_id);
        assert_eq!(back.affected_region, edit.affected_region);
        assert_eq!(back.parameters["depth"], serde_json::json!(0.8));
    }
}
