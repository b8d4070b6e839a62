//! Decision engine
//!
//! Geometry in, verdicts out. Nothing here touches pixels: detections arrive as plain
//! data (see [`FrameDetections`]) and overlays leave as plain data (see [`OverlayPlan`]).

pub mod config;
pub mod frame_analysis;
pub mod geometry;
pub mod goal;
pub mod goal_detection;
pub mod offside;
pub mod overlay;
pub mod play_analysis;
pub mod roles;
pub mod segments;

pub use config::VarConfig;
pub use frame_analysis::{analyze_frame, FrameAnalysis, FrameDetections, FrameSource};
pub use geometry::{euclidean_distance, LineSegment, Point};
pub use goal::{find_scoring_goal, Goal, GoalCheck};
pub use goal_detection::{detect_goals, GoalDetector};
pub use offside::{classify_offside, AttackerEvaluation, OffsideDecision};
pub use overlay::{Banner, OffsideMarker, OverlayPlan};
pub use play_analysis::{
    analyze_plays_parallel, AnalysisResult, PlayAnalyzer, PlayFrames, PlayOutcome, PlayPhase,
};
pub use roles::{
    find_goalkeeper, find_last_defender, find_last_defender_against, find_receiver, TeamRoles,
};
pub use segments::{classify_segments, ClassifiedSegments};
