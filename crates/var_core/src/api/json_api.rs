use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::config::VarConfig;
use crate::engine::frame_analysis::{analyze_frame, FrameAnalysis, FrameDetections};
use crate::engine::geometry::{LineSegment, Point};
use crate::engine::goal::{find_scoring_goal, Goal};
use crate::engine::goal_detection::GoalDetector;
use crate::engine::play_analysis::{PlayAnalyzer, PlayOutcome};
use crate::error::{ErrorKind, FrameRole, VarError};
use crate::models::FieldSize;
use crate::state::MatchState;
use crate::SCHEMA_VERSION;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
    pub const MISSING_DETECTION: &str = "MISSING_DETECTION";
    pub const CONFIG: &str = "CONFIG";
    pub const INTERNAL: &str = "INTERNAL";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn engine_err(err: VarError) -> String {
    let code = match &err {
        VarError::UnsupportedSchema { .. } => error_codes::UNSUPPORTED_SCHEMA,
        other => match other.kind() {
            ErrorKind::MissingDetection => error_codes::MISSING_DETECTION,
            ErrorKind::Input => error_codes::INVALID_REQUEST,
            ErrorKind::Config => error_codes::CONFIG,
            ErrorKind::Internal => error_codes::INTERNAL,
        },
    };
    err_code(code, err)
}

fn check_schema(found: u8) -> Result<(), String> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(engine_err(VarError::UnsupportedSchema { found, expected: SCHEMA_VERSION }))
    }
}

/// Named preset from the request wins over the caller's config
fn resolve_config(profile: Option<&str>, base: &VarConfig) -> Result<VarConfig, String> {
    match profile {
        None => Ok(*base),
        Some(name) => VarConfig::from_profile(name).ok_or_else(|| {
            engine_err(VarError::Config(format!("unknown profile '{name}'")))
        }),
    }
}

fn parse<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::INVALID_REQUEST, format!("Invalid JSON request: {e}")))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value)
        .map_err(|e| err_code(error_codes::INTERNAL, format!("Failed to serialize response: {e}")))
}

// ============================================================================
// Play
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlayRequest {
    pub schema_version: u8,
    /// Frame where the ball is received
    pub receive: FrameDetections,
    /// Frame where the shot is taken
    pub shoot: FrameDetections,
    pub field: FieldSize,
    /// Team colors are swapped relative to Blue-left/top
    #[serde(default)]
    pub reversed: bool,
    /// Config preset: "default", "lenient" or "strict"
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub outcome: PlayOutcome,
}

/// Judge one play. `state` is updated when a goal is given.
pub fn analyze_play_json(request_json: &str, state: &mut MatchState) -> Result<String, String> {
    analyze_play_json_with_config(request_json, &VarConfig::from_env_or_default(), state)
}

pub fn analyze_play_json_with_config(
    request_json: &str,
    config: &VarConfig,
    state: &mut MatchState,
) -> Result<String, String> {
    let request: PlayRequest = parse(request_json)?;
    check_schema(request.schema_version)?;
    let config = resolve_config(request.profile.as_deref(), config)?;

    let outcome = PlayAnalyzer::new(config)
        .analyze_play(&request.receive, &request.shoot, &request.field, request.reversed, state)
        .map_err(engine_err)?;

    to_json(&PlayResponse { schema_version: SCHEMA_VERSION, outcome })
}

/// JSON Schema of [`PlayRequest`], pretty-printed
pub fn play_request_schema() -> Result<String, String> {
    let schema = schemars::schema_for!(PlayRequest);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| err_code(error_codes::INTERNAL, format!("Failed to serialize schema: {e}")))
}

// ============================================================================
// Single frame
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FrameRequest {
    pub schema_version: u8,
    pub frame: FrameDetections,
    pub field: FieldSize,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub analysis: FrameAnalysis,
}

pub fn analyze_frame_json(request_json: &str) -> Result<String, String> {
    analyze_frame_json_with_config(request_json, &VarConfig::from_env_or_default())
}

pub fn analyze_frame_json_with_config(request_json: &str, config: &VarConfig) -> Result<String, String> {
    let request: FrameRequest = parse(request_json)?;
    check_schema(request.schema_version)?;
    let config = resolve_config(request.profile.as_deref(), config)?;

    let analysis =
        analyze_frame(&request.frame, &request.field, request.reversed, &config, FrameRole::Single)
            .map_err(engine_err)?;

    to_json(&FrameResponse { schema_version: SCHEMA_VERSION, analysis })
}

// ============================================================================
// Goal reconstruction
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GoalsRequest {
    pub schema_version: u8,
    pub segments: Vec<LineSegment>,
    /// When present, the response says which goal (if any) contains it
    #[serde(default)]
    pub ball: Option<Point>,
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub schema_version: u8,
    pub goals: Vec<Goal>,
    pub scoring_goal: Option<usize>,
}

pub fn detect_goals_json(request_json: &str) -> Result<String, String> {
    detect_goals_json_with_config(request_json, &VarConfig::from_env_or_default())
}

pub fn detect_goals_json_with_config(request_json: &str, config: &VarConfig) -> Result<String, String> {
    let request: GoalsRequest = parse(request_json)?;
    check_schema(request.schema_version)?;
    let config = resolve_config(request.profile.as_deref(), config)?;

    let goals = GoalDetector::new(config.goal_detection, config.segment_bands).detect(&request.segments);
    let scoring_goal = request.ball.and_then(|ball| find_scoring_goal(&goals, &ball));

    to_json(&GoalsResponse { schema_version: SCHEMA_VERSION, goals, scoring_goal })
}
