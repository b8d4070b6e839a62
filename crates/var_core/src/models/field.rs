//! Field frame description
//!
//! The field is the whole frame: goal points and offside-line extents are derived from
//! the frame size in pixels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::Team;
use crate::engine::geometry::Point;

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSize {
    pub width: f64,
    pub height: f64,
}

impl FieldSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Center of the goal mouth a team defends.
    ///
    /// - Horizontal: Blue `(0, h/2)`, Red `(w, h/2)`
    /// - Vertical: Blue `(w/2, 0)`, Red `(w/2, h)`
    pub fn goal_point(&self, team: Team, orientation: FieldOrientation) -> Point {
        match (orientation, team) {
            (FieldOrientation::Horizontal, Team::Blue) => Point::new(0.0, self.height / 2.0),
            (FieldOrientation::Horizontal, Team::Red) => Point::new(self.width, self.height / 2.0),
            (FieldOrientation::Vertical, Team::Blue) => Point::new(self.width / 2.0, 0.0),
            (FieldOrientation::Vertical, Team::Red) => Point::new(self.width / 2.0, self.height),
        }
    }
}

/// Which image axis is "downfield".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrientation {
    /// Downfield is the x axis
    #[default]
    Horizontal,
    /// Downfield is the y axis
    Vertical,
}

impl FieldOrientation {
    /// Landscape frames are Horizontal, everything else (including square) is Vertical.
    pub fn from_field_size(size: &FieldSize) -> Self {
        if size.width > size.height {
            FieldOrientation::Horizontal
        } else {
            FieldOrientation::Vertical
        }
    }

    /// Coordinate of `point` along the orientation axis
    #[inline]
    pub fn axis_coord(&self, point: &Point) -> f64 {
        match self {
            FieldOrientation::Horizontal => point.x,
            FieldOrientation::Vertical => point.y,
        }
    }

    /// Move `point` by `offset` along the orientation axis
    #[inline]
    pub fn shift_along_axis(&self, point: &Point, offset: f64) -> Point {
        match self {
            FieldOrientation::Horizontal => Point::new(point.x + offset, point.y),
            FieldOrientation::Vertical => Point::new(point.x, point.y + offset),
        }
    }
}
