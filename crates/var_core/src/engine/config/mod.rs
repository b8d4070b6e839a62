//! # Engine Configuration
//!
//! All tuning constants in one place, with presets.
//!
//! ```rust
//! use var_core::engine::config::VarConfig;
//!
//! let config = VarConfig::default();
//! let lenient = VarConfig::lenient();
//! let from_env = VarConfig::from_env_or_default();
//! ```
//!
//! ## Environment Variables
//!
//! - `VAR_CONFIG_PROFILE`: Select preset (lenient, strict, default)

mod thresholds_config;

pub use thresholds_config::{GoalDetectionThresholds, OffsideRules, OverlayThresholds, SegmentBands};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Result, VarError};

/// Full engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VarConfig {
    pub segment_bands: SegmentBands,
    pub goal_detection: GoalDetectionThresholds,
    pub offside: OffsideRules,
    pub overlay: OverlayThresholds,
}

impl VarConfig {
    /// Wider tolerances for low-resolution or heavily compressed frames
    pub fn lenient() -> Self {
        Self {
            goal_detection: GoalDetectionThresholds {
                merge_distance_px: 30.0,
                min_post_height_px: 35.0,
                max_post_height_ratio: 3.0,
                crossbar_tolerance_px: 30.0,
                ..GoalDetectionThresholds::default()
            },
            ..Self::default()
        }
    }

    /// Tighter geometry plus the full offside law (attacker must be ahead of the ball)
    pub fn strict() -> Self {
        Self {
            goal_detection: GoalDetectionThresholds {
                merge_distance_px: 12.0,
                merge_angle_deg: 10.0,
                max_post_height_ratio: 1.8,
                max_post_angle_deg: 20.0,
                crossbar_tolerance_px: 12.0,
                ..GoalDetectionThresholds::default()
            },
            offside: OffsideRules { require_ahead_of_ball: true, exclude_ball_carrier: false },
            ..Self::default()
        }
    }

    pub fn from_profile(profile: &str) -> Option<Self> {
        match profile.to_lowercase().as_str() {
            "default" | "" => Some(Self::default()),
            "lenient" => Some(Self::lenient()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }

    /// Load from environment variable VAR_CONFIG_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        let profile = env::var("VAR_CONFIG_PROFILE").unwrap_or_default();
        match Self::from_profile(&profile) {
            Some(config) => config,
            None => {
                tracing::warn!(profile = %profile, "unknown VAR_CONFIG_PROFILE, using default");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json { Self::from_json_str(&text)? } else { Self::from_yaml_str(&text)? };
        tracing::debug!(path = %path.display(), "loaded VAR config");
        Ok(config)
    }

    /// Reject values that would make a stage accept nothing or everything.
    pub fn validate(&self) -> Result<()> {
        let g = &self.goal_detection;
        let positive = [
            ("merge_distance_px", g.merge_distance_px),
            ("merge_angle_deg", g.merge_angle_deg),
            ("min_post_height_px", g.min_post_height_px),
            ("max_post_angle_deg", g.max_post_angle_deg),
            ("crossbar_tolerance_px", g.crossbar_tolerance_px),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(VarError::Config(format!("{} must be positive, got {}", name, value)));
            }
        }
        if !(g.max_post_height_ratio.is_finite() && g.max_post_height_ratio >= 1.0) {
            return Err(VarError::Config(format!(
                "max_post_height_ratio must be >= 1.0, got {}",
                g.max_post_height_ratio
            )));
        }
        if !(g.min_goal_separation_px.is_finite() && g.min_goal_separation_px >= 0.0) {
            return Err(VarError::Config(format!(
                "min_goal_separation_px must be >= 0, got {}",
                g.min_goal_separation_px
            )));
        }

        let b = &self.segment_bands;
        if !(b.vertical_min_deg < b.vertical_max_deg
            && b.horizontal_max_deg < b.vertical_min_deg
            && b.vertical_max_deg < b.horizontal_reverse_min_deg)
        {
            return Err(VarError::Config(format!(
                "segment bands overlap or are out of order: {:?}",
                b
            )));
        }
        Ok(())
    }
}

// ========== Tests ==========
