//! Segment classification
//!
//! Splits the raw output of the line-segment detector into post candidates
//! (near-vertical) and crossbar candidates (near-horizontal). Segments in neither band
//! are dropped, as are degenerate ones (NaN/inf coordinates, zero or overflowing length).

use serde::{Deserialize, Serialize};

use super::config::SegmentBands;
use super::geometry::LineSegment;

/// Segments sorted into the two bands goal reconstruction cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSegments {
    pub vertical: Vec<LineSegment>,
    pub horizontal: Vec<LineSegment>,
    /// Segments that fell in neither band or were degenerate
    pub discarded: usize,
}

impl ClassifiedSegments {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Band of a single segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentBand {
    Vertical,
    Horizontal,
    Other,
}

pub fn band_of(segment: &LineSegment, bands: &SegmentBands) -> SegmentBand {
    let length = segment.length();
    if !segment.is_finite() || !length.is_finite() || length <= 0.0 {
        return SegmentBand::Other;
    }

    let angle = segment.abs_angle_deg();
    if angle > bands.vertical_min_deg && angle < bands.vertical_max_deg {
        SegmentBand::Vertical
    } else if angle < bands.horizontal_max_deg || angle > bands.horizontal_reverse_min_deg {
        SegmentBand::Horizontal
    } else {
        SegmentBand::Other
    }
}

/// Sort raw segments into bands, preserving input order within each band.
pub fn classify_segments(segments: &[LineSegment], bands: &SegmentBands) -> ClassifiedSegments {
    let mut out = ClassifiedSegments::default();
    for segment in segments {
        match band_of(segment, bands) {
            SegmentBand::Vertical => out.vertical.push(*segment),
            SegmentBand::Horizontal => out.horizontal.push(*segment),
            SegmentBand::Other => out.discarded += 1,
        }
    }
    out
}
