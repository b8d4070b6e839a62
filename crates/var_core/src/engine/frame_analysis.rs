//! Single-frame analysis
//!
//! One image worth of detections in, every role and the offside set out:
//!
//! 1. Validate (players present, ball present, usable field size)
//! 2. Orientation from the frame dimensions, team flip when the caller says the
//!    colors are reversed
//! 3. Goalkeepers and absolute last defenders of both teams
//! 4. Ball carrier, relative last defender, offside pass
//! 5. Overlay plan for the renderer

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::VarConfig;
use super::geometry::{LineSegment, Point};
use super::offside::{classify_offside, OffsideDecision};
use super::overlay::OverlayPlan;
use super::roles::{find_last_defender_against, find_receiver, TeamRoles};
use crate::error::{FrameRole, Result, VarError};
use crate::models::{flip_teams, FieldOrientation, FieldSize, Player, PlayerDetection, Team};

// ============================================================================
// Detections
// ============================================================================

/// Everything the detection collaborators report for one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrameDetections {
    pub players: Vec<PlayerDetection>,
    pub ball: Option<Point>,
    #[serde(default)]
    pub segments: Vec<LineSegment>,
}

/// Where frame detections come from.
///
/// Image-based detectors implement this; already-decoded detections implement it
/// trivially.
pub trait FrameSource {
    fn detections(&self) -> FrameDetections;
}

impl FrameSource for FrameDetections {
    fn detections(&self) -> FrameDetections {
        self.clone()
    }
}

impl FrameDetections {
    /// Reject frames the engine cannot decide on. Players are checked before the ball.
    pub fn validate(&self, frame: FrameRole) -> Result<Point> {
        if self.players.is_empty() {
            return Err(VarError::NoPlayers { frame });
        }
        let ball = self.ball.ok_or(VarError::MissingBall { frame })?;
        if !ball.is_finite() || self.players.iter().any(|p| !p.position.is_finite()) {
            return Err(VarError::InvalidRequest(format!("non-finite coordinates in the {}", frame)));
        }
        Ok(ball)
    }

    /// Fresh roster for this frame, teams flipped when `reversed`
    pub fn roster(&self, reversed: bool) -> Vec<Player> {
        let mut players: Vec<Player> = self.players.iter().copied().map(Player::from).collect();
        if reversed {
            flip_teams(&mut players);
        }
        players
    }
}

pub(crate) fn validate_field(field: &FieldSize) -> Result<()> {
    if field.is_valid() {
        Ok(())
    } else {
        Err(VarError::InvalidRequest(format!(
            "field size must be positive and finite, got {}x{}",
            field.width, field.height
        )))
    }
}

// ============================================================================
// Analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub orientation: FieldOrientation,
    /// Roster after any flip, with offside flags from this frame's pass
    pub players: Vec<Player>,
    pub ball: Point,
    pub ball_carrier: usize,
    pub attacking_team: Team,
    pub roles: TeamRoles,
    pub offside: OffsideDecision,
    pub overlay: OverlayPlan,
}

impl FrameAnalysis {
    pub fn is_offside(&self) -> bool {
        self.offside.is_offside()
    }

    pub fn offside_players(&self) -> impl Iterator<Item = &Player> {
        self.offside.offside_players.iter().filter_map(|&idx| self.players.get(idx))
    }
}

/// Analyse one frame. `frame` only names the frame in errors.
pub fn analyze_frame(
    detections: &FrameDetections,
    field: &FieldSize,
    reversed: bool,
    config: &VarConfig,
    frame: FrameRole,
) -> Result<FrameAnalysis> {
    validate_field(field)?;
    let ball = detections.validate(frame)?;
    analyze_roster(detections.roster(reversed), ball, field, config)
}

/// Roles, offside pass and overlay on an already prepared roster
pub(crate) fn analyze_roster(
    mut players: Vec<Player>,
    ball: Point,
    field: &FieldSize,
    config: &VarConfig,
) -> Result<FrameAnalysis> {
    let orientation = FieldOrientation::from_field_size(field);
    let roles = TeamRoles::identify(&players, field, orientation);

    let ball_carrier = find_receiver(&players, &ball).ok_or(VarError::UnresolvedReceiver)?;
    let attacking_team = players[ball_carrier].team;
    let last_defender = find_last_defender_against(&players, attacking_team, field, orientation);

    let offside = classify_offside(
        &mut players,
        attacking_team,
        ball_carrier,
        last_defender,
        orientation,
        &config.offside,
    );
    let overlay = OverlayPlan::for_offside(
        &players,
        ball_carrier,
        &offside,
        field,
        orientation,
        &config.overlay,
    );

    tracing::debug!(
        ?orientation,
        ball_carrier,
        attacking_team = %attacking_team,
        offside = offside.offside_players.len(),
        "frame analysed"
    );

    Ok(FrameAnalysis {
        orientation,
        players,
        ball,
        ball_carrier,
        attacking_team,
        roles,
        offside,
        overlay,
    })
}
