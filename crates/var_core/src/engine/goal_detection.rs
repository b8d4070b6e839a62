//! Goal structure reconstruction
//!
//! Builds `Goal`s out of an unordered bag of detected line segments:
//!
//! 1. Merge vertical fragments that belong to the same post
//! 2. Pair merged posts of similar height and direction
//! 3. Fit a crossbar across each pair's top or bottom ends
//! 4. Drop goals whose center lies too close to one already accepted
//!
//! Reconstruction never fails. An empty result means "no goal structure in this frame".

use super::config::{GoalDetectionThresholds, SegmentBands};
use super::geometry::LineSegment;
use super::goal::Goal;
use super::segments::classify_segments;

#[derive(Debug, Clone, Copy, Default)]
pub struct GoalDetector {
    thresholds: GoalDetectionThresholds,
    bands: SegmentBands,
}

impl GoalDetector {
    pub fn new(thresholds: GoalDetectionThresholds, bands: SegmentBands) -> Self {
        Self { thresholds, bands }
    }

    pub fn thresholds(&self) -> &GoalDetectionThresholds {
        &self.thresholds
    }

    /// Reconstruct goals from raw, unclassified segments
    pub fn detect(&self, segments: &[LineSegment]) -> Vec<Goal> {
        let classified = classify_segments(segments, &self.bands);
        tracing::debug!(
            vertical = classified.vertical.len(),
            horizontal = classified.horizontal.len(),
            discarded = classified.discarded,
            "classified goal segments"
        );
        self.detect_classified(&classified.vertical, &classified.horizontal)
    }

    /// Reconstruct goals from segments already split into vertical and horizontal bands
    pub fn detect_classified(&self, vertical: &[LineSegment], horizontal: &[LineSegment]) -> Vec<Goal> {
        let posts = self.merge_nearby_verticals(vertical);
        let mut goals: Vec<Goal> = Vec::new();

        for i in 0..posts.len() {
            for j in (i + 1)..posts.len() {
                let (post1, post2) = (posts[i], posts[j]);
                if !self.is_valid_post_pair(&post1, &post2) {
                    continue;
                }
                let Some(crossbar) = self.find_crossbar(&post1, &post2, horizontal) else {
                    continue;
                };

                let candidate = Goal::new(post1, post2, crossbar);
                if goals.iter().any(|existing| self.is_duplicate(existing, &candidate)) {
                    continue;
                }
                goals.push(candidate);
            }
        }

        tracing::debug!(posts = posts.len(), goals = goals.len(), "goal reconstruction done");
        goals
    }

    /// Collapse vertical fragments of the same post into one averaged segment.
    ///
    /// Each unused segment seeds a group and absorbs every later unused segment close to
    /// the *seed*; absorbed segments never seed a group of their own.
    pub fn merge_nearby_verticals(&self, lines: &[LineSegment]) -> Vec<LineSegment> {
        let mut merged = Vec::with_capacity(lines.len());
        let mut used = vec![false; lines.len()];

        for i in 0..lines.len() {
            if used[i] {
                continue;
            }
            used[i] = true;

            let seed = lines[i];
            let mut group = vec![seed];
            for j in (i + 1)..lines.len() {
                if !used[j] && self.should_merge(&seed, &lines[j]) {
                    group.push(lines[j]);
                    used[j] = true;
                }
            }

            if let Some(line) = LineSegment::average(&group) {
                merged.push(line);
            }
        }

        merged
    }

    fn should_merge(&self, a: &LineSegment, b: &LineSegment) -> bool {
        let tolerance = self.thresholds.merge_distance_px;
        a.start().distance_to(&b.start()) < tolerance
            && a.end().distance_to(&b.end()) < tolerance
            && a.angle_difference(b) < self.thresholds.merge_angle_deg.to_radians()
    }

    /// Height, height-ratio and parallelism test for a candidate post pair
    pub fn is_valid_post_pair(&self, post1: &LineSegment, post2: &LineSegment) -> bool {
        let h1 = post1.length();
        let h2 = post2.length();
        let min_height = self.thresholds.min_post_height_px;

        if !(h1.is_finite() && h2.is_finite()) || h1 < min_height || h2 < min_height {
            return false;
        }

        let ratio = h1.max(h2) / h1.min(h2);
        if ratio.is_nan() || ratio > self.thresholds.max_post_height_ratio {
            return false;
        }

        post1.angle_difference(post2) < self.thresholds.max_post_angle_deg.to_radians()
    }

    /// Best-fitting crossbar for a post pair, if any.
    ///
    /// Qualifies when its mean Y is near both top ends or near both bottom ends, and its
    /// length is within twice the tolerance of the mouth width. Smallest length error wins;
    /// ties keep the earlier segment.
    pub fn find_crossbar(
        &self,
        post1: &LineSegment,
        post2: &LineSegment,
        horizontal: &[LineSegment],
    ) -> Option<LineSegment> {
        let tolerance = self.thresholds.crossbar_tolerance_px;
        let expected_width = post1.start().distance_to(&post2.start());

        let mut best: Option<(f64, LineSegment)> = None;
        for line in horizontal {
            let near_ends = is_near_post_ends(line, post1, post2, tolerance, PostEnd::Top)
                || is_near_post_ends(line, post1, post2, tolerance, PostEnd::Bottom);
            if !near_ends {
                continue;
            }

            let width_diff = (line.length() - expected_width).abs();
            if width_diff >= tolerance * 2.0 {
                continue;
            }

            if best.map_or(true, |(score, _)| width_diff < score) {
                best = Some((width_diff, *line));
            }
        }

        best.map(|(_, line)| line)
    }

    fn is_duplicate(&self, a: &Goal, b: &Goal) -> bool {
        a.center().distance_to(&b.center()) < self.thresholds.min_goal_separation_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostEnd {
    Top,
    Bottom,
}

fn is_near_post_ends(
    horizontal: &LineSegment,
    post1: &LineSegment,
    post2: &LineSegment,
    tolerance: f64,
    end: PostEnd,
) -> bool {
    let (y1, y2) = match end {
        PostEnd::Top => (post1.top_y(), post2.top_y()),
        PostEnd::Bottom => (post1.bottom_y(), post2.bottom_y()),
    };
    let bar_y = horizontal.mid_y();
    (bar_y - y1).abs() < tolerance && (bar_y - y2).abs() < tolerance
}

/// Convenience wrapper with default thresholds
pub fn detect_goals(segments: &[LineSegment]) -> Vec<Goal> {
    GoalDetector::default().detect(segments)
}
