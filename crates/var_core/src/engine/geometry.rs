//! Geometry primitives
//!
//! Everything here works in raw image pixels. No unit conversion, no calibration.
//!
//! ## Coordinate System
//! - X: 0 = left edge of the frame, grows to the right
//! - Y: 0 = top edge of the frame, grows downward (row-major image convention)
//!
//! Angles come from `atan2(dy, dx)` and therefore live in (−π, π].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A position on the field, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        euclidean_distance(self.x, self.y, other.x, other.y)
    }

    /// Component-wise mean of two points
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A detected line segment `(x1, y1)-(x2, y2)`.
///
/// Endpoint order is meaningful: goal evaluation reads the *first* endpoint of each post,
/// so segments are never normalized or re-ordered after detection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Direction angle in radians, (−π, π]
    pub fn angle(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1)
    }

    /// Absolute direction angle in degrees, [0, 180]
    pub fn abs_angle_deg(&self) -> f64 {
        self.angle().to_degrees().abs()
    }

    pub fn length(&self) -> f64 {
        euclidean_distance(self.x1, self.y1, self.x2, self.y2)
    }

    pub fn midpoint(&self) -> Point {
        self.start().midpoint(&self.end())
    }

    /// Mean of the two endpoint Y values
    pub fn mid_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    /// Smaller Y of the two endpoints (the end nearer the top of the frame)
    pub fn top_y(&self) -> f64 {
        self.y1.min(self.y2)
    }

    /// Larger Y of the two endpoints (the end nearer the bottom of the frame)
    pub fn bottom_y(&self) -> f64 {
        self.y1.max(self.y2)
    }

    /// Raw difference of direction angles, in radians.
    ///
    /// Not wrapped: a segment and its reversed copy differ by π.
    pub fn angle_difference(&self, other: &LineSegment) -> f64 {
        (self.angle() - other.angle()).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    /// Average the endpoints of a group of segments, first endpoint with first endpoint.
    ///
    /// Returns `None` for an empty group.
    pub fn average(group: &[LineSegment]) -> Option<LineSegment> {
        match group {
            [] => None,
            [single] => Some(*single),
            _ => {
                let n = group.len() as f64;
                let (x1, y1, x2, y2) = group.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, l| {
                    (acc.0 + l.x1, acc.1 + l.y1, acc.2 + l.x2, acc.3 + l.y2)
                });
                Some(LineSegment::new(x1 / n, y1 / n, x2 / n, y2 / n))
            }
        }
    }
}

/// Distance between two raw coordinate pairs.
///
/// Uses `hypot`, so it stays finite whenever the coordinate differences do.
#[inline]
pub fn euclidean_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}
