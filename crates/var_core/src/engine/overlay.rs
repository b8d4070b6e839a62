//! Overlay plan
//!
//! Geometry a renderer needs to annotate a frame. Nothing is drawn here; the plan is
//! plain data so any drawing backend can consume it.
//!
//! | Element          | Source                                                    |
//! |------------------|-----------------------------------------------------------|
//! | Offside line     | Last defender, pushed past their marker circle, full span |
//! | Offside markers  | An X over every offside attacker                          |
//! | Attack arrows    | Carrier → onside teammates ahead of the ball              |
//! | Attack direction | Fixed-length arrow from the carrier toward the goal       |
//! | Goal outlines    | Reconstructed goals of the shoot frame                    |
//! | Banner           | `GOAL` / `OFFSIDE`                                        |

use serde::{Deserialize, Serialize};

use super::config::OverlayThresholds;
use super::geometry::{LineSegment, Point};
use super::goal::Goal;
use super::offside::OffsideDecision;
use crate::models::{FieldOrientation, FieldSize, Player, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Banner {
    Goal,
    Offside,
}

impl Banner {
    pub fn text(&self) -> &'static str {
        match self {
            Banner::Goal => "GOAL",
            Banner::Offside => "OFFSIDE",
        }
    }
}

/// X drawn over an offside player: two diagonals of a square centered on them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsideMarker {
    pub player: usize,
    pub strokes: [LineSegment; 2],
}

impl OffsideMarker {
    pub fn around(player: usize, center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self {
            player,
            strokes: [
                LineSegment::new(center.x - half, center.y - half, center.x + half, center.y + half),
                LineSegment::new(center.x + half, center.y - half, center.x - half, center.y + half),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverlayPlan {
    pub offside_line: Option<LineSegment>,
    pub offside_markers: Vec<OffsideMarker>,
    pub attack_arrows: Vec<LineSegment>,
    pub attack_direction: Option<LineSegment>,
    pub goal_outlines: Vec<Goal>,
    /// Ball position to highlight when a goal is given
    pub highlighted_ball: Option<Point>,
    pub banner: Option<Banner>,
}

impl OverlayPlan {
    /// Offside annotations for one analysed frame.
    ///
    /// `players` must carry the flags set by the offside pass that produced `decision`.
    pub fn for_offside(
        players: &[Player],
        ball_carrier: usize,
        decision: &OffsideDecision,
        field: &FieldSize,
        orientation: FieldOrientation,
        thresholds: &OverlayThresholds,
    ) -> Self {
        let offside_line = decision
            .last_defender
            .and_then(|idx| players.get(idx))
            .map(|defender| offside_line_segment(defender, field, orientation, thresholds));

        let offside_markers = decision
            .offside_players
            .iter()
            .filter_map(|&idx| {
                players
                    .get(idx)
                    .map(|p| OffsideMarker::around(idx, p.position, thresholds.offside_marker_size_px))
            })
            .collect();

        let (attack_arrows, attack_direction) = match players.get(ball_carrier) {
            Some(carrier) => (
                attack_arrows(players, ball_carrier, orientation),
                Some(attack_direction(carrier, orientation, thresholds.attack_arrow_length_px)),
            ),
            None => (Vec::new(), None),
        };

        Self {
            offside_line,
            offside_markers,
            attack_arrows,
            attack_direction,
            banner: decision.is_offside().then_some(Banner::Offside),
            ..Self::default()
        }
    }

    /// Goal annotations for a shoot frame
    pub fn for_goal(goals: &[Goal], ball: Point, scored: bool) -> Self {
        Self {
            goal_outlines: goals.to_vec(),
            highlighted_ball: scored.then_some(ball),
            banner: scored.then_some(Banner::Goal),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Line through the last defender, shifted by the marker radius plus a small offset.
///
/// A Blue defender's line moves toward low coordinates, a Red defender's toward high
/// ones, and it spans the whole field on the other axis.
pub fn offside_line_segment(
    defender: &Player,
    field: &FieldSize,
    orientation: FieldOrientation,
    thresholds: &OverlayThresholds,
) -> LineSegment {
    let push = thresholds.player_circle_radius_px + thresholds.offside_line_offset_px;
    let signed = match defender.team {
        Team::Blue => -push,
        Team::Red => push,
    };
    let at = orientation.axis_coord(&defender.position) + signed;
    match orientation {
        FieldOrientation::Horizontal => LineSegment::new(at, 0.0, at, field.height),
        FieldOrientation::Vertical => LineSegment::new(0.0, at, field.width, at),
    }
}

/// Arrows from the carrier to teammates ahead of them who are not offside
pub fn attack_arrows(
    players: &[Player],
    ball_carrier: usize,
    orientation: FieldOrientation,
) -> Vec<LineSegment> {
    let Some(carrier) = players.get(ball_carrier) else {
        return Vec::new();
    };
    let carrier_coord = orientation.axis_coord(&carrier.position);

    players
        .iter()
        .enumerate()
        .filter(|(idx, p)| *idx != ball_carrier && p.team == carrier.team && !p.is_offside)
        .filter(|(_, p)| carrier.team.is_ahead(orientation.axis_coord(&p.position), carrier_coord))
        .map(|(_, p)| LineSegment::from_points(carrier.position, p.position))
        .collect()
}

fn attack_direction(carrier: &Player, orientation: FieldOrientation, length: f64) -> LineSegment {
    let signed = if carrier.team.is_blue() { length } else { -length };
    LineSegment::from_points(carrier.position, orientation.shift_along_axis(&carrier.position, signed))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: FieldSize = FieldSize::new(1000.0, 600.0);
    const H: FieldOrientation = FieldOrientation::Horizontal;

    fn p(x: f64, y: f64, team: Team) -> Player {
        Player::new(Point::new(x, y), team)
    }

    #[test]
    fn test_offside_line_offsets() {
        let thresholds = OverlayThresholds::default();
        let red = p(400.0, 250.0, Team::Red);
        let line = offside_line_segment(&red, &FIELD, H, &thresholds);
        assert_eq!(line, LineSegment::new(426.0, 0.0, 426.0, 600.0));

        let blue = p(400.0, 250.0, Team::Blue);
        let line = offside_line_segment(&blue, &FIELD, H, &thresholds);
        assert_eq!(line, LineSegment::new(374.0, 0.0, 374.0, 600.0));

        let vertical = offside_line_segment(&red, &FIELD, FieldOrientation::Vertical, &thresholds);
        assert_eq!(vertical, LineSegment::new(0.0, 276.0, 1000.0, 276.0));
    }

    #[test]
    fn test_marker_strokes() {
        let marker = OffsideMarker::around(3, Point::new(100.0, 100.0), 60.0);
        assert_eq!(marker.player, 3);
        assert_eq!(marker.strokes[0], LineSegment::new(70.0, 70.0, 130.0, 130.0));
        assert_eq!(marker.strokes[1], LineSegment::new(130.0, 70.0, 70.0, 130.0));
    }

    #[test]
    fn test_attack_arrows_skip_offside_and_trailing() {
        let mut players = vec![
            p(500.0, 300.0, Team::Blue), // carrier
            p(600.0, 200.0, Team::Blue), // ahead, onside
            p(650.0, 400.0, Team::Blue), // ahead, offside
            p(450.0, 350.0, Team::Blue), // behind
            p(700.0, 300.0, Team::Red),
        ];
        players[2].is_offside = true;

        let arrows = attack_arrows(&players, 0, H);
        assert_eq!(arrows, vec![LineSegment::new(500.0, 300.0, 600.0, 200.0)]);
        assert!(attack_arrows(&players, 99, H).is_empty());
    }

    #[test]
    fn test_red_attack_direction_points_to_low_x() {
        let carrier = p(500.0, 300.0, Team::Red);
        let arrow = attack_direction(&carrier, H, 100.0);
        assert_eq!(arrow.end(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_plan_for_offside_frame() {
        let mut players = vec![p(500.0, 300.0, Team::Blue), p(400.0, 250.0, Team::Red)];
        players[0].is_offside = true;
        let decision = OffsideDecision {
            offside_line: Some(400.0),
            last_defender: Some(1),
            offside_players: vec![0],
            evaluations: Vec::new(),
        };
        let plan =
            OverlayPlan::for_offside(&players, 0, &decision, &FIELD, H, &OverlayThresholds::default());

        assert_eq!(plan.banner, Some(Banner::Offside));
        assert_eq!(plan.offside_markers.len(), 1);
        assert_eq!(plan.offside_line.map(|l| l.x1), Some(426.0));
        assert_eq!(plan.attack_direction.map(|l| l.end()), Some(Point::new(600.0, 300.0)));
        assert!(plan.goal_outlines.is_empty());
    }

    #[test]
    fn test_plan_without_defender_has_no_line() {
        let players = vec![p(500.0, 300.0, Team::Blue)];
        let plan = OverlayPlan::for_offside(
            &players,
            0,
            &OffsideDecision::default(),
            &FIELD,
            H,
            &OverlayThresholds::default(),
        );
        assert!(plan.offside_line.is_none());
        assert!(plan.banner.is_none());
    }

    #[test]
    fn test_plan_for_goal() {
        let goal = Goal::new(
            LineSegment::new(500.0, 150.0, 500.0, 250.0),
            LineSegment::new(560.0, 150.0, 560.0, 250.0),
            LineSegment::new(500.0, 260.0, 560.0, 260.0),
        );
        let ball = Point::new(520.0, 180.0);
        let scored = OverlayPlan::for_goal(&[goal], ball, true);
        assert_eq!(scored.banner.map(|b| b.text()), Some("GOAL"));
        assert_eq!(scored.highlighted_ball, Some(ball));

        let missed = OverlayPlan::for_goal(&[goal], ball, false);
        assert_eq!(missed.goal_outlines.len(), 1);
        assert!(missed.banner.is_none());
        assert!(OverlayPlan::default().is_empty());
    }
}
