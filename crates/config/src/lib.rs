//! Shared configuration for Gesso
//!
//! This crate is the single source of truth for the tunables of the raster
//! core: stroke sampling thresholds, default fill tolerance and history depth.
//! Hosts can embed an [`EngineConfig`] in their own settings files; every
//! section is optional in JSON and falls back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Samples closer than this (in pixels) to the previous point are dropped
pub const DEFAULT_MIN_SAMPLE_DISTANCE: f32 = 2.0;

/// Segments longer than this (in pixels) are gap-filled with synthesized samples
pub const DEFAULT_GAP_THRESHOLD: f32 = 5.0;

/// Distance between synthesized samples when gap-filling
pub const DEFAULT_INTERPOLATION_STEP: f32 = 3.0;

/// Default flood-fill tolerance (color distance units, 0..~255)
pub const DEFAULT_FILL_TOLERANCE: f32 = 32.0;

/// Default number of undo levels kept by the reference document host
pub const DEFAULT_MAX_UNDO_LEVELS: usize = 20;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Stroke sampling configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Minimum spacing between recorded samples in pixels
    pub min_sample_distance: f32,
    /// Distance above which intermediate samples are synthesized
    pub gap_threshold: f32,
    /// Spacing of synthesized samples in pixels
    pub interpolation_step: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            min_sample_distance: DEFAULT_MIN_SAMPLE_DISTANCE,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            interpolation_step: DEFAULT_INTERPOLATION_STEP,
        }
    }
}

/// Fill configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Tolerance used when the host does not supply one
    pub default_tolerance: f32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            default_tolerance: DEFAULT_FILL_TOLERANCE,
        }
    }
}

/// History configuration for hosts that keep snapshot undo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_undo_levels: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo_levels: DEFAULT_MAX_UNDO_LEVELS,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stroke: StrokeConfig,
    pub fill: FillConfig,
    pub history: HistoryConfig,
}

impl EngineConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stroke = &self.stroke;
        if !stroke.min_sample_distance.is_finite() || stroke.min_sample_distance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "stroke.min_sample_distance",
                reason: format!("must be a non-negative number, got {}", stroke.min_sample_distance),
            });
        }
        if !stroke.gap_threshold.is_finite() || stroke.gap_threshold <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "stroke.gap_threshold",
                reason: format!("must be positive, got {}", stroke.gap_threshold),
            });
        }
        // A zero step would synthesize samples forever
        if !stroke.interpolation_step.is_finite() || stroke.interpolation_step < 0.5 {
            return Err(ConfigError::Invalid {
                field: "stroke.interpolation_step",
                reason: format!("must be at least 0.5, got {}", stroke.interpolation_step),
            });
        }
        if !self.fill.default_tolerance.is_finite() || self.fill.default_tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "fill.default_tolerance",
                reason: format!("must be a non-negative number, got {}", self.fill.default_tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.stroke.min_sample_distance, DEFAULT_MIN_SAMPLE_DISTANCE);
        assert_eq!(config.stroke.gap_threshold, DEFAULT_GAP_THRESHOLD);
        assert_eq!(config.stroke.interpolation_step, DEFAULT_INTERPOLATION_STEP);
        assert_eq!(config.history.max_undo_levels, DEFAULT_MAX_UNDO_LEVELS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "stroke": { "gap_threshold": 8.0 } }"#).unwrap();
        assert_eq!(config.stroke.gap_threshold, 8.0);
        assert_eq!(config.stroke.interpolation_step, DEFAULT_INTERPOLATION_STEP);
        assert_eq!(config.fill.default_tolerance, DEFAULT_FILL_TOLERANCE);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = EngineConfig::default();
        config.history.max_undo_levels = 5;
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = EngineConfig::from_json(r#"{ "stroke": { "interpolation_step": 0.0 } }"#);
        assert!(matches!(
            err,
            Err(ConfigError::Invalid { field: "stroke.interpolation_step", .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(EngineConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
