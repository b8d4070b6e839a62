//! Goal structure and ball-in-goal test
//!
//! A `Goal` is two posts plus a crossbar as reconstructed from the frame's line segments
//! (see `goal_detection`). The ball test works purely in the 2-D image plane.
//!
//! ## Known approximation
//! Only the *first* endpoint of each post is read, so a post leaning under perspective
//! is treated as if it stood at its first endpoint's x. Depth is never checked.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::{LineSegment, Point};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Goal {
    pub post1: LineSegment,
    pub post2: LineSegment,
    pub crossbar: LineSegment,
}

/// Breakdown of a single ball-vs-goal test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCheck {
    pub is_between_posts: bool,
    /// Legacy name: the crossbar Y is *greater* than both post anchors
    pub is_top_goal: bool,
    pub is_at_right_height: bool,
}

impl GoalCheck {
    pub fn is_inside(&self) -> bool {
        self.is_between_posts && self.is_at_right_height
    }
}

impl Goal {
    pub fn new(post1: LineSegment, post2: LineSegment, crossbar: LineSegment) -> Self {
        Self { post1, post2, crossbar }
    }

    /// Average of the two post midpoints, used for deduplication
    pub fn center(&self) -> Point {
        self.post1.midpoint().midpoint(&self.post2.midpoint())
    }

    /// Distance between the posts' first endpoints
    pub fn mouth_width(&self) -> f64 {
        self.post1.start().distance_to(&self.post2.start())
    }

    pub fn check_ball(&self, ball: &Point) -> GoalCheck {
        let (x1, y1) = (self.post1.x1, self.post1.y1);
        let (x2, y2) = (self.post2.x1, self.post2.y1);
        let crossbar_y = self.crossbar.y1;

        let is_between_posts = ball.x >= x1.min(x2) && ball.x <= x1.max(x2);
        let is_top_goal = crossbar_y > y1.max(y2);

        let is_at_right_height = if is_top_goal {
            ball.y <= crossbar_y && ball.y >= y1.min(y2)
        } else {
            ball.y >= crossbar_y && ball.y <= y1.max(y2)
        };

        GoalCheck { is_between_posts, is_top_goal, is_at_right_height }
    }

    pub fn contains_ball(&self, ball: &Point) -> bool {
        self.check_ball(ball).is_inside()
    }
}

/// Index of the first goal containing the ball
pub fn find_scoring_goal(goals: &[Goal], ball: &Point) -> Option<usize> {
    goals.iter().position(|goal| goal.contains_ball(ball))
}
