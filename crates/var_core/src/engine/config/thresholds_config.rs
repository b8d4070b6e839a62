//! Detection thresholds
//!
//! Every tolerance the geometry stages use, in pixels or degrees. Defaults match the
//! values the engine was tuned with on 720p broadcast stills.
//!
//! | Category | Description |
//! |----------|-------------|
//! | SegmentBands | Angle bands splitting raw segments into post/crossbar candidates |
//! | GoalDetection | Post merging, post pairing, crossbar fit, goal deduplication |
//! | OffsideRules | Which optional offside-law checks are enforced |
//! | Overlay | Marker sizes handed to the rendering collaborator |

use serde::{Deserialize, Serialize};

/// Angle bands (degrees, on `|angle|`) used to split raw segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentBands {
    /// Exclusive lower bound of the vertical band
    pub vertical_min_deg: f64,
    /// Exclusive upper bound of the vertical band
    pub vertical_max_deg: f64,
    /// `|angle| < this` is horizontal
    pub horizontal_max_deg: f64,
    /// `|angle| > this` is also horizontal (segment drawn right-to-left)
    pub horizontal_reverse_min_deg: f64,
}

impl Default for SegmentBands {
    fn default() -> Self {
        Self {
            vertical_min_deg: 75.0,
            vertical_max_deg: 105.0,
            horizontal_max_deg: 15.0,
            horizontal_reverse_min_deg: 165.0,
        }
    }
}

/// Goal-structure reconstruction thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDetectionThresholds {
    /// Max endpoint distance for two vertical pieces to be the same post (px)
    pub merge_distance_px: f64,
    /// Max angle difference for two vertical pieces to be the same post (degrees)
    pub merge_angle_deg: f64,
    /// Shortest accepted post (px)
    pub min_post_height_px: f64,
    /// Longer post / shorter post upper bound
    pub max_post_height_ratio: f64,
    /// Max angle difference between the two posts of a goal (degrees)
    pub max_post_angle_deg: f64,
    /// Crossbar Y must sit this close to both post ends (px); length slack is twice this
    pub crossbar_tolerance_px: f64,
    /// Goals whose centers are closer than this are the same goal (px)
    pub min_goal_separation_px: f64,
}

impl Default for GoalDetectionThresholds {
    fn default() -> Self {
        Self {
            merge_distance_px: 20.0,
            merge_angle_deg: 15.0,
            min_post_height_px: 50.0,
            max_post_height_ratio: 2.5,
            max_post_angle_deg: 30.0,
            crossbar_tolerance_px: 20.0,
            min_goal_separation_px: 100.0,
        }
    }
}

/// Optional offside-law checks.
///
/// Both default to `false`, which is the engine's established call: an attacker is
/// offside as soon as they are strictly beyond the last defender, regardless of the
/// ball, and the ball carrier is judged like everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsideRules {
    /// Also require the attacker to be ahead of the ball carrier
    pub require_ahead_of_ball: bool,
    /// Never flag the ball carrier
    pub exclude_ball_carrier: bool,
}

/// Marker geometry for the overlay plan (px)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayThresholds {
    /// Radius of the circle drawn around a player; the offside line is pushed past it
    pub player_circle_radius_px: f64,
    /// Extra push of the offside line beyond the player circle
    pub offside_line_offset_px: f64,
    /// Side length of the X drawn over an offside player
    pub offside_marker_size_px: f64,
    /// Length of the "attack direction" arrow from the ball carrier
    pub attack_arrow_length_px: f64,
}

impl Default for OverlayThresholds {
    fn default() -> Self {
        Self {
            player_circle_radius_px: 25.0,
            offside_line_offset_px: 1.0,
            offside_marker_size_px: 60.0,
            attack_arrow_length_px: 100.0,
        }
    }
}
