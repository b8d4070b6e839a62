//! # var_core - Video Assistant Referee Decision Engine
//!
//! Decides offside and goal outcomes for a football play from per-frame detections
//! (player centroids with team colors, ball position, line segments).
//!
//! ## Features
//! - Goal structure reconstruction from raw line segments
//! - Goalkeeper, last defender and offside classification
//! - Two-frame play analysis (receive, then shoot) with a caller-owned score
//! - Overlay plans for the renderer, session records for persistence
//! - JSON API for easy integration
//!
//! ```rust
//! use var_core::{analyze_play_json, MatchState};
//!
//! let mut score = MatchState::default();
//! let request = r#"{
//!     "schema_version": 1,
//!     "receive": {
//!         "players": [{"position": {"x": 300.0, "y": 300.0}, "team": "blue"}],
//!         "ball": {"x": 305.0, "y": 300.0}
//!     },
//!     "shoot": {
//!         "players": [{"position": {"x": 520.0, "y": 300.0}, "team": "blue"}],
//!         "ball": {"x": 520.0, "y": 180.0}
//!     },
//!     "field": {"width": 1000.0, "height": 600.0}
//! }"#;
//! let response = analyze_play_json(request, &mut score).unwrap();
//! assert!(response.contains("No goal."));
//! ```

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod state;

// Re-export main API functions
pub use api::{
    analyze_frame_json, analyze_play_json, detect_goals_json, play_request_schema, FrameRequest,
    GoalsRequest, PlayRequest,
};
pub use error::{ErrorKind, FrameRole, Result, VarError};

// Re-export engine types
pub use engine::{
    analyze_frame, analyze_plays_parallel, AnalysisResult, FrameAnalysis, FrameDetections,
    FrameSource, Goal, LineSegment, OverlayPlan, PlayAnalyzer, PlayFrames, PlayOutcome, PlayPhase,
    Point, VarConfig,
};
pub use models::{FieldOrientation, FieldSize, Player, PlayerDetection, Team};
pub use state::{MatchSession, MatchState, PlayRecord, SharedMatchState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
