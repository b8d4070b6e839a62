//! Play analysis
//!
//! A play is two frames: the moment the ball is received and the moment the shot is
//! taken.
//!
//! ```text
//! ReceiveAnalyzed ──offside──▶ Offside
//!        │
//!        └──onside──▶ NotOffside ──ball in goal──▶ Goal
//!                          │
//!                          └──otherwise──▶ NoGoal
//! ```
//!
//! Both frames are validated before anything is judged, so a bad shoot frame never
//! leaves a half-applied play. The score is touched only on `Goal`, once, and the
//! snapshot after the increment is returned with the outcome.

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::VarConfig;
use super::frame_analysis::{analyze_roster, validate_field, FrameAnalysis, FrameDetections, FrameSource};
use super::goal::{find_scoring_goal, Goal};
use super::goal_detection::GoalDetector;
use super::offside::OffsideDecision;
use super::overlay::OverlayPlan;
use crate::error::{FrameRole, Result};
use crate::models::{FieldSize, Team};
use crate::state::{MatchState, SharedMatchState};

pub const OFFSIDE_MESSAGE: &str = "Offside! Action disallowed";
pub const NO_GOAL_MESSAGE: &str = "No goal.";

// ============================================================================
// Result types
// ============================================================================

/// Verdict of one play, as shown to the operator and stored per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_offside: bool,
    pub is_goal: bool,
    pub message: String,
}

impl AnalysisResult {
    pub fn offside() -> Self {
        Self { is_offside: true, is_goal: false, message: OFFSIDE_MESSAGE.to_string() }
    }

    pub fn no_goal() -> Self {
        Self { is_offside: false, is_goal: false, message: NO_GOAL_MESSAGE.to_string() }
    }

    /// `score` is the score after this goal
    pub fn goal(team: Team, score: &MatchState) -> Self {
        Self {
            is_offside: false,
            is_goal: true,
            message: format!(
                "Goal! {} team scores (Blue {} - {} Red)",
                team, score.blue_score, score.red_score
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayPhase {
    ReceiveAnalyzed,
    Offside,
    NotOffside,
    Goal,
    NoGoal,
}

impl PlayPhase {
    pub fn after_receive(self, is_offside: bool) -> Self {
        match self {
            PlayPhase::ReceiveAnalyzed if is_offside => PlayPhase::Offside,
            PlayPhase::ReceiveAnalyzed => PlayPhase::NotOffside,
            other => other,
        }
    }

    pub fn after_shoot(self, scored: bool) -> Self {
        match self {
            PlayPhase::NotOffside if scored => PlayPhase::Goal,
            PlayPhase::NotOffside => PlayPhase::NoGoal,
            other => other,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PlayPhase::Offside | PlayPhase::Goal | PlayPhase::NoGoal)
    }
}

/// Verdict plus the evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub result: AnalysisResult,
    pub phase: PlayPhase,
    /// Index of the receiver in the receive frame's roster
    pub receiver: usize,
    pub attacking_team: Team,
    pub offside: OffsideDecision,
    /// Goals reconstructed in the shoot frame; empty when the play stopped at offside
    pub goals: Vec<Goal>,
    pub scoring_goal: Option<usize>,
    pub scoring_team: Option<Team>,
    /// Score right after this play
    pub score: MatchState,
    pub receive_overlay: OverlayPlan,
    pub shoot_overlay: Option<OverlayPlan>,
}

/// Both frames of one play, as decoded detections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayFrames {
    pub receive: FrameDetections,
    pub shoot: FrameDetections,
    pub field: FieldSize,
    #[serde(default)]
    pub reversed: bool,
}

// ============================================================================
// Analyzer
// ============================================================================

/// Everything decided before the score is touched
struct Verdict {
    phase: PlayPhase,
    receive: FrameAnalysis,
    goals: Vec<Goal>,
    scoring_goal: Option<usize>,
    shoot_overlay: Option<OverlayPlan>,
}

impl Verdict {
    fn scoring_team(&self) -> Option<Team> {
        (self.phase == PlayPhase::Goal).then_some(self.receive.attacking_team)
    }

    fn into_outcome(self, score: MatchState) -> PlayOutcome {
        let scoring_team = self.scoring_team();
        let result = match (self.phase, scoring_team) {
            (PlayPhase::Offside, _) => AnalysisResult::offside(),
            (PlayPhase::Goal, Some(team)) => AnalysisResult::goal(team, &score),
            _ => AnalysisResult::no_goal(),
        };

        tracing::info!(
            phase = ?self.phase,
            receiver = self.receive.ball_carrier,
            blue = score.blue_score,
            red = score.red_score,
            "{}",
            result.message
        );

        PlayOutcome {
            result,
            phase: self.phase,
            receiver: self.receive.ball_carrier,
            attacking_team: self.receive.attacking_team,
            offside: self.receive.offside,
            goals: self.goals,
            scoring_goal: self.scoring_goal,
            scoring_team,
            score,
            receive_overlay: self.receive.overlay,
            shoot_overlay: self.shoot_overlay,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayAnalyzer {
    config: VarConfig,
    detector: GoalDetector,
}

impl PlayAnalyzer {
    pub fn new(config: VarConfig) -> Self {
        let detector = GoalDetector::new(config.goal_detection, config.segment_bands);
        Self { config, detector }
    }

    /// Judge one play and update `state` when a goal is given.
    pub fn analyze_play<R, S>(
        &self,
        receive: &R,
        shoot: &S,
        field: &FieldSize,
        reversed: bool,
        state: &mut MatchState,
    ) -> Result<PlayOutcome>
    where
        R: FrameSource + ?Sized,
        S: FrameSource + ?Sized,
    {
        let verdict = self.judge(&receive.detections(), &shoot.detections(), field, reversed)?;
        if let Some(team) = verdict.scoring_team() {
            state.record_goal(team);
        }
        Ok(verdict.into_outcome(*state))
    }

    /// Same as [`analyze_play`](Self::analyze_play) against a score shared between
    /// threads. Geometry runs outside the lock.
    pub fn analyze_play_shared<R, S>(
        &self,
        receive: &R,
        shoot: &S,
        field: &FieldSize,
        reversed: bool,
        state: &SharedMatchState,
    ) -> Result<PlayOutcome>
    where
        R: FrameSource + ?Sized,
        S: FrameSource + ?Sized,
    {
        let verdict = self.judge(&receive.detections(), &shoot.detections(), field, reversed)?;
        let score = match verdict.scoring_team() {
            Some(team) => state.record_goal(team)?,
            None => state.snapshot()?,
        };
        Ok(verdict.into_outcome(score))
    }

    /// One packaged play against a shared score
    pub fn analyze_frames(&self, play: &PlayFrames, state: &SharedMatchState) -> Result<PlayOutcome> {
        self.analyze_play_shared(&play.receive, &play.shoot, &play.field, play.reversed, state)
    }

    fn judge(
        &self,
        receive: &FrameDetections,
        shoot: &FrameDetections,
        field: &FieldSize,
        reversed: bool,
    ) -> Result<Verdict> {
        validate_field(field)?;
        let receive_ball = receive.validate(FrameRole::Receive)?;
        let shoot_ball = shoot.validate(FrameRole::Shoot)?;

        let receive_analysis =
            analyze_roster(receive.roster(reversed), receive_ball, field, &self.config)?;
        let phase = PlayPhase::ReceiveAnalyzed.after_receive(receive_analysis.is_offside());

        if phase == PlayPhase::Offside {
            return Ok(Verdict {
                phase,
                receive: receive_analysis,
                goals: Vec::new(),
                scoring_goal: None,
                shoot_overlay: None,
            });
        }

        let goals = self.detector.detect(&shoot.segments);
        let scoring_goal = find_scoring_goal(&goals, &shoot_ball);
        let phase = phase.after_shoot(scoring_goal.is_some());
        let shoot_overlay = OverlayPlan::for_goal(&goals, shoot_ball, scoring_goal.is_some());

        Ok(Verdict {
            phase,
            receive: receive_analysis,
            goals,
            scoring_goal,
            shoot_overlay: Some(shoot_overlay),
        })
    }
}

/// Judge a batch of independent plays concurrently against one shared score.
///
/// Results come back in input order. Final totals are deterministic; which play's
/// message carries which intermediate score depends on scheduling.
pub fn analyze_plays_parallel(
    analyzer: &PlayAnalyzer,
    plays: &[PlayFrames],
    state: &SharedMatchState,
) -> Vec<Result<PlayOutcome>> {
    plays.par_iter().map(|play| analyzer.analyze_frames(play, state)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::{LineSegment, Point};
    use crate::error::VarError;
    use crate::models::PlayerDetection;

    const FIELD: FieldSize = FieldSize::new(1000.0, 600.0);

    fn det(x: f64, y: f64, team: Team) -> PlayerDetection {
        PlayerDetection { position: Point::new(x, y), team }
    }

    /// Blue carrier at `attacker_x`, Red last defender at 400, both goalkeepers
    fn receive_frame(attacker_x: f64) -> FrameDetections {
        FrameDetections {
            players: vec![
                det(30.0, 300.0, Team::Blue),
                det(attacker_x, 300.0, Team::Blue),
                det(400.0, 250.0, Team::Red),
                det(970.0, 300.0, Team::Red),
            ],
            ball: Some(Point::new(attacker_x + 5.0, 300.0)),
            segments: Vec::new(),
        }
    }

    fn goal_segments() -> Vec<LineSegment> {
        vec![
            LineSegment::new(500.0, 150.0, 500.0, 250.0),
            LineSegment::new(560.0, 150.0, 560.0, 250.0),
            LineSegment::new(500.0, 260.0, 560.0, 260.0),
        ]
    }

    fn shoot_frame(ball: Point) -> FrameDetections {
        FrameDetections {
            players: vec![det(520.0, 300.0, Team::Blue), det(900.0, 300.0, Team::Red)],
            ball: Some(ball),
            segments: goal_segments(),
        }
    }

    #[test]
    fn test_offside_play_skips_goal_check() {
        let analyzer = PlayAnalyzer::default();
        let mut state = MatchState::default();
        let outcome = analyzer
            .analyze_play(
                &receive_frame(500.0),
                &shoot_frame(Point::new(520.0, 180.0)),
                &FIELD,
                false,
                &mut state,
            )
            .unwrap();

        assert_eq!(outcome.phase, PlayPhase::Offside);
        assert!(outcome.result.is_offside);
        assert!(!outcome.result.is_goal);
        assert_eq!(outcome.result.message, "Offside! Action disallowed");
        assert!(outcome.goals.is_empty());
        assert!(outcome.shoot_overlay.is_none());
        assert_eq!(state, MatchState::default());
    }

    #[test]
    fn test_onside_goal_increments_receiver_team() {
        let analyzer = PlayAnalyzer::default();
        let mut state = MatchState { blue_score: 0, red_score: 2 };
        let outcome = analyzer
            .analyze_play(
                &receive_frame(300.0),
                &shoot_frame(Point::new(520.0, 180.0)),
                &FIELD,
                false,
                &mut state,
            )
            .unwrap();

        assert_eq!(outcome.phase, PlayPhase::Goal);
        assert!(outcome.result.is_goal);
        assert_eq!(outcome.scoring_team, Some(Team::Blue));
        assert_eq!(outcome.scoring_goal, Some(0));
        assert_eq!(outcome.result.message, "Goal! Blue team scores (Blue 1 - 2 Red)");
        assert_eq!(state, MatchState { blue_score: 1, red_score: 2 });
        assert_eq!(outcome.score, state);
        assert!(outcome.shoot_overlay.and_then(|o| o.banner).is_some());
    }

    #[test]
    fn test_onside_miss() {
        let analyzer = PlayAnalyzer::default();
        let mut state = MatchState::default();
        let outcome = analyzer
            .analyze_play(
                &receive_frame(300.0),
                &shoot_frame(Point::new(700.0, 180.0)),
                &FIELD,
                false,
                &mut state,
            )
            .unwrap();

        assert_eq!(outcome.phase, PlayPhase::NoGoal);
        assert_eq!(outcome.result, AnalysisResult::no_goal());
        assert_eq!(outcome.goals.len(), 1);
        assert_eq!(state, MatchState::default());
    }

    #[test]
    fn test_no_goal_structure_is_not_an_error() {
        let analyzer = PlayAnalyzer::default();
        let mut shoot = shoot_frame(Point::new(520.0, 180.0));
        shoot.segments.clear();
        let mut state = MatchState::default();
        let outcome =
            analyzer.analyze_play(&receive_frame(300.0), &shoot, &FIELD, false, &mut state).unwrap();
        assert_eq!(outcome.phase, PlayPhase::NoGoal);
        assert!(outcome.goals.is_empty());
    }

    #[test]
    fn test_reversed_play_credits_flipped_team() {
        // Labels swapped: the detector's "Red" carrier is really Blue, and vice versa.
        let mut receive = receive_frame(300.0);
        for player in receive.players.iter_mut() {
            player.team = player.team.opponent();
        }
        let mut shoot = shoot_frame(Point::new(520.0, 180.0));
        for player in shoot.players.iter_mut() {
            player.team = player.team.opponent();
        }

        let analyzer = PlayAnalyzer::default();
        let mut state = MatchState::default();
        let outcome = analyzer.analyze_play(&receive, &shoot, &FIELD, true, &mut state).unwrap();
        assert_eq!(outcome.scoring_team, Some(Team::Blue));
        assert_eq!(state.blue_score, 1);
    }

    #[test]
    fn test_shoot_frame_validated_before_judging() {
        let analyzer = PlayAnalyzer::default();
        let mut shoot = shoot_frame(Point::new(520.0, 180.0));
        shoot.ball = None;
        let mut state = MatchState::default();

        let err = analyzer
            .analyze_play(&receive_frame(500.0), &shoot, &FIELD, false, &mut state)
            .unwrap_err();
        assert!(matches!(err, VarError::MissingBall { frame: FrameRole::Shoot }));

        let mut receive = receive_frame(300.0);
        receive.players.clear();
        let err = analyzer
            .analyze_play(&receive, &shoot_frame(Point::new(520.0, 180.0)), &FIELD, false, &mut state)
            .unwrap_err();
        assert!(matches!(err, VarError::NoPlayers { frame: FrameRole::Receive }));
        assert_eq!(state, MatchState::default());
    }

    #[test]
    fn test_phase_transitions() {
        let start = PlayPhase::ReceiveAnalyzed;
        assert_eq!(start.after_receive(true), PlayPhase::Offside);
        assert_eq!(start.after_receive(false), PlayPhase::NotOffside);
        assert_eq!(PlayPhase::Goal.after_receive(true), PlayPhase::Goal);
        assert_eq!(PlayPhase::NotOffside.after_shoot(true), PlayPhase::Goal);
        assert_eq!(PlayPhase::NotOffside.after_shoot(false), PlayPhase::NoGoal);
        assert_eq!(PlayPhase::Offside.after_shoot(true), PlayPhase::Offside);
        assert!(!PlayPhase::ReceiveAnalyzed.is_terminal());
        assert!(!PlayPhase::NotOffside.is_terminal());
        assert!(PlayPhase::NoGoal.is_terminal());
    }

    #[test]
    fn test_shared_state_matches_exclusive() {
        let analyzer = PlayAnalyzer::default();
        let shared = SharedMatchState::default();
        let outcome = analyzer
            .analyze_play_shared(
                &receive_frame(300.0),
                &shoot_frame(Point::new(520.0, 180.0)),
                &FIELD,
                false,
                &shared,
            )
            .unwrap();
        assert_eq!(outcome.score, MatchState { blue_score: 1, red_score: 0 });
        assert_eq!(shared.snapshot().unwrap(), outcome.score);
    }

    #[test]
    fn test_parallel_batch() {
        let goal = PlayFrames {
            receive: receive_frame(300.0),
            shoot: shoot_frame(Point::new(520.0, 180.0)),
            field: FIELD,
            reversed: false,
        };
        let offside = PlayFrames { receive: receive_frame(500.0), ..goal.clone() };
        let broken = PlayFrames {
            shoot: FrameDetections { ball: None, ..shoot_frame(Point::new(0.0, 0.0)) },
            ..goal.clone()
        };
        let plays = vec![goal.clone(), offside, goal.clone(), broken, goal];

        let shared = SharedMatchState::default();
        let results = analyze_plays_parallel(&PlayAnalyzer::default(), &plays, &shared);

        assert_eq!(results.len(), 5);
        assert_eq!(results[1].as_ref().map(|o| o.phase).ok(), Some(PlayPhase::Offside));
        assert!(results[3].is_err());
        assert_eq!(shared.snapshot().unwrap(), MatchState { blue_score: 3, red_score: 0 });
    }
}
