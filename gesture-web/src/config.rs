//! Pipeline constants and startup configuration
//!
//! The constants are the defaults. A `PipelineConfig` may override them once,
//! at construction, from a JSON string; after validation it never changes.

use log::LevelFilter;
use serde::Deserialize;

use crate::bridge::INDEX_TIP;
use crate::error::{GestureError, Result};

/// Number of frames in the point history and in each vote history
pub const HISTORY_LENGTH: usize = 16;

/// Minimum (exclusive) top probability for a static verdict to count
pub const STATIC_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Minimum (exclusive) top probability for a dynamic verdict to count
pub const DYNAMIC_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Landmarks per hand (MediaPipe Hands)
pub const HAND_LANDMARK_COUNT: usize = 21;

/// The point whose trajectory feeds the dynamic classifier
pub const TRACKED_LANDMARK: usize = INDEX_TIP;

/// Shown when no static vote has been accepted yet
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub history_length: usize,
    pub static_threshold: f32,
    pub dynamic_threshold: f32,
    pub landmark_count: usize,
    pub tracked_landmark: usize,
    /// Expected static classifier output length, if known
    pub static_classes: Option<usize>,
    /// Expected dynamic classifier output length, if known
    pub dynamic_classes: Option<usize>,
    pub log_level: LevelFilter,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_length: HISTORY_LENGTH,
            static_threshold: STATIC_CONFIDENCE_THRESHOLD,
            dynamic_threshold: DYNAMIC_CONFIDENCE_THRESHOLD,
            landmark_count: HAND_LANDMARK_COUNT,
            tracked_landmark: TRACKED_LANDMARK,
            static_classes: None,
            dynamic_classes: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GestureError::Configuration(format!("config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, threshold) in [
            ("static_threshold", self.static_threshold),
            ("dynamic_threshold", self.dynamic_threshold),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(GestureError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, threshold
                )));
            }
        }

        // A single buffered point always normalizes to all zeros
        if self.history_length < 2 {
            return Err(GestureError::Configuration(format!(
                "history_length must be at least 2, got {}",
                self.history_length
            )));
        }

        if self.landmark_count < 2 {
            return Err(GestureError::Configuration(format!(
                "landmark_count must be at least 2, got {}",
                self.landmark_count
            )));
        }

        if self.tracked_landmark >= self.landmark_count {
            return Err(GestureError::Configuration(format!(
                "tracked_landmark {} is not below landmark_count {}",
                self.tracked_landmark, self.landmark_count
            )));
        }

        if self.static_classes == Some(0) || self.dynamic_classes == Some(0) {
            return Err(GestureError::Configuration(
                "class counts must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.history_length, 16);
        assert_eq!(config.tracked_landmark, 8);
        assert_eq!(config.static_threshold, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"dynamic_threshold": 0.8, "log_level": "debug"}"#;
        let config = PipelineConfig::from_json(json).unwrap();
        assert_eq!(config.dynamic_threshold, 0.8);
        assert_eq!(config.static_threshold, STATIC_CONFIDENCE_THRESHOLD);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{"static_threshold": 1.5}"#,
            r#"{"history_length": 1}"#,
            r#"{"tracked_landmark": 21}"#,
            r#"{"dynamic_classes": 0}"#,
            r#"{"unknown_field": true}"#,
            "not json",
        ] {
            assert!(
                matches!(PipelineConfig::from_json(json), Err(GestureError::Configuration(_))),
                "accepted {}",
                json
            );
        }
    }
}
