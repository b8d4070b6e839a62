//! Offside classification
//!
//! The offside line runs through the relative last defender (see `roles`). With the
//! default `OffsideRules`, an attacker is offside iff strictly beyond that line in the
//! attacking direction. Whether they are also ahead of the ball carrier is computed and
//! reported but only enforced when `require_ahead_of_ball` is set.
//!
//! No last defender means no line, and no one is offside.

use serde::{Deserialize, Serialize};

use super::config::OffsideRules;
use crate::models::{FieldOrientation, Player, Team};

/// Per-attacker evaluation against the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerEvaluation {
    pub index: usize,
    pub ahead_of_offside_line: bool,
    pub ahead_of_ball: bool,
    pub is_offside: bool,
}

/// Result of one offside pass over a frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsideDecision {
    /// Axis coordinate of the line, absent when no last defender exists
    pub offside_line: Option<f64>,
    pub last_defender: Option<usize>,
    /// Indices of offside attackers, in roster order
    pub offside_players: Vec<usize>,
    pub evaluations: Vec<AttackerEvaluation>,
}

impl OffsideDecision {
    pub fn is_offside(&self) -> bool {
        !self.offside_players.is_empty()
    }
}

/// Classify every attacker and update the roster's `is_offside` flags.
///
/// Every flag in the roster is cleared first, so defenders and anyone not classified
/// offside end up `false`. Running it twice on the same roster gives the same answer.
pub fn classify_offside(
    players: &mut [Player],
    attacking_team: Team,
    ball_carrier: usize,
    last_defender: Option<usize>,
    orientation: FieldOrientation,
    rules: &OffsideRules,
) -> OffsideDecision {
    for player in players.iter_mut() {
        player.is_offside = false;
    }

    let (Some(defender_idx), Some(carrier)) = (last_defender, players.get(ball_carrier).copied())
    else {
        return OffsideDecision { last_defender, ..OffsideDecision::default() };
    };
    let Some(defender) = players.get(defender_idx) else {
        return OffsideDecision::default();
    };

    let offside_line = orientation.axis_coord(&defender.position);
    let ball_coord = orientation.axis_coord(&carrier.position);

    let mut evaluations = Vec::new();
    for (index, player) in players.iter_mut().enumerate() {
        if player.team != attacking_team {
            continue;
        }
        let coord = orientation.axis_coord(&player.position);
        let ahead_of_offside_line = attacking_team.is_ahead(coord, offside_line);
        let ahead_of_ball = attacking_team.is_ahead(coord, ball_coord);

        let is_offside = ahead_of_offside_line
            && (!rules.require_ahead_of_ball || ahead_of_ball)
            && !(rules.exclude_ball_carrier && index == ball_carrier);

        player.is_offside = is_offside;
        evaluations.push(AttackerEvaluation { index, ahead_of_offside_line, ahead_of_ball, is_offside });
    }

    let offside_players: Vec<usize> =
        evaluations.iter().filter(|e| e.is_offside).map(|e| e.index).collect();

    tracing::debug!(
        attacking_team = %attacking_team,
        offside_line,
        offside = offside_players.len(),
        "offside classification"
    );

    OffsideDecision {
        offside_line: Some(offside_line),
        last_defender: Some(defender_idx),
        offside_players,
        evaluations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Point;
    use crate::engine::roles::find_last_defender_against;
    use crate::models::FieldSize;

    const H: FieldOrientation = FieldOrientation::Horizontal;
    const FIELD: FieldSize = FieldSize::new(1000.0, 600.0);

    fn p(x: f64, y: f64, team: Team) -> Player {
        Player::new(Point::new(x, y), team)
    }

    /// Blue attacker with the ball at `attacker_x`, Red last defender at x=400, Red GK at 980
    fn scenario(attacker_x: f64) -> Vec<Player> {
        vec![
            p(attacker_x, 300.0, Team::Blue),
            p(20.0, 300.0, Team::Blue),
            p(400.0, 250.0, Team::Red),
            p(980.0, 300.0, Team::Red),
        ]
    }

    fn run(players: &mut [Player], rules: OffsideRules) -> OffsideDecision {
        let defender = find_last_defender_against(players, Team::Blue, &FIELD, H);
        classify_offside(players, Team::Blue, 0, defender, H, &rules)
    }

    #[test]
    fn test_attacker_beyond_line_is_offside() {
        let mut players = scenario(500.0);
        let decision = run(&mut players, OffsideRules::default());
        assert_eq!(decision.offside_line, Some(400.0));
        assert_eq!(decision.last_defender, Some(2));
        assert_eq!(decision.offside_players, vec![0]);
        assert!(players[0].is_offside);
        assert!(decision.is_offside());
    }

    #[test]
    fn test_attacker_behind_line_is_onside() {
        let mut players = scenario(300.0);
        let decision = run(&mut players, OffsideRules::default());
        assert!(decision.offside_players.is_empty());
        assert!(players.iter().all(|p| !p.is_offside));
    }

    #[test]
    fn test_level_with_line_is_onside() {
        let mut players = scenario(400.0);
        assert!(!run(&mut players, OffsideRules::default()).is_offside());
    }

    #[test]
    fn test_red_attack_direction() {
        let mut players = vec![
            p(20.0, 300.0, Team::Blue),  // blue GK
            p(300.0, 300.0, Team::Blue), // blue last defender
            p(250.0, 200.0, Team::Red),  // beyond the line toward x=0
            p(350.0, 200.0, Team::Red),  // behind the line
            p(980.0, 300.0, Team::Red),
        ];
        let defender = find_last_defender_against(&players, Team::Red, &FIELD, H);
        assert_eq!(defender, Some(1));
        let decision =
            classify_offside(&mut players, Team::Red, 3, defender, H, &OffsideRules::default());
        assert_eq!(decision.offside_players, vec![2]);
    }

    #[test]
    fn test_vertical_field_uses_y_axis() {
        let field = FieldSize::new(600.0, 1000.0);
        let v = FieldOrientation::Vertical;

        // Blue attacks toward y=1000; x plays no part
        let mut players = vec![
            p(300.0, 500.0, Team::Blue), // carrier, behind the line
            p(200.0, 700.0, Team::Blue), // beyond the line
            p(590.0, 590.0, Team::Blue), // far right but short of the line
            p(250.0, 600.0, Team::Red),  // last defender
            p(300.0, 980.0, Team::Red),  // goalkeeper
            p(300.0, 20.0, Team::Blue),
        ];
        let defender = find_last_defender_against(&players, Team::Blue, &field, v);
        assert_eq!(defender, Some(3));
        let decision =
            classify_offside(&mut players, Team::Blue, 0, defender, v, &OffsideRules::default());
        assert_eq!(decision.offside_line, Some(600.0));
        assert_eq!(decision.offside_players, vec![1]);
        assert!(players[1].is_offside);

        // Red attacks toward y=0
        let mut players = vec![
            p(300.0, 20.0, Team::Blue),  // goalkeeper
            p(300.0, 400.0, Team::Blue), // last defender
            p(300.0, 500.0, Team::Red),  // carrier
            p(100.0, 300.0, Team::Red),  // beyond the line
            p(500.0, 400.0, Team::Red),  // level
            p(300.0, 980.0, Team::Red),
        ];
        let defender = find_last_defender_against(&players, Team::Red, &field, v);
        assert_eq!(defender, Some(1));
        let decision =
            classify_offside(&mut players, Team::Red, 2, defender, v, &OffsideRules::default());
        assert_eq!(decision.offside_line, Some(400.0));
        assert_eq!(decision.offside_players, vec![3]);
    }

    #[test]
    fn test_ball_check_is_reported_but_not_required_by_default() {
        // Teammate beyond the line but behind the ball carrier
        let mut players = vec![
            p(600.0, 300.0, Team::Blue), // carrier
            p(500.0, 200.0, Team::Blue), // beyond line, behind ball
            p(400.0, 250.0, Team::Red),
            p(980.0, 300.0, Team::Red),
        ];
        let decision = run(&mut players, OffsideRules::default());
        assert_eq!(decision.offside_players, vec![0, 1]);
        let teammate = decision.evaluations.iter().find(|e| e.index == 1).unwrap();
        assert!(teammate.ahead_of_offside_line);
        assert!(!teammate.ahead_of_ball);

        let strict = OffsideRules { require_ahead_of_ball: true, exclude_ball_carrier: false };
        let decision = run(&mut players, strict);
        assert!(decision.offside_players.is_empty());
        assert!(!players[1].is_offside);
    }

    #[test]
    fn test_exclude_ball_carrier_rule() {
        let mut players = scenario(500.0);
        let rules = OffsideRules { require_ahead_of_ball: false, exclude_ball_carrier: true };
        assert!(!run(&mut players, rules).is_offside());
    }

    #[test]
    fn test_no_last_defender_means_no_offside() {
        let mut players = vec![p(900.0, 300.0, Team::Blue), p(980.0, 300.0, Team::Red)];
        players[0].is_offside = true;
        let defender = find_last_defender_against(&players, Team::Blue, &FIELD, H);
        assert_eq!(defender, None);
        let decision =
            classify_offside(&mut players, Team::Blue, 0, defender, H, &OffsideRules::default());
        assert_eq!(decision.offside_line, None);
        assert!(!decision.is_offside());
        assert!(!players[0].is_offside);
    }

    #[test]
    fn test_stale_flags_cleared_and_defenders_never_flagged() {
        let mut players = scenario(300.0);
        for player in players.iter_mut() {
            player.is_offside = true;
        }
        run(&mut players, OffsideRules::default());
        assert!(players.iter().all(|p| !p.is_offside));
    }

    #[test]
    fn test_idempotent() {
        let mut players = vec![
            p(500.0, 300.0, Team::Blue),
            p(450.0, 100.0, Team::Blue),
            p(350.0, 400.0, Team::Blue),
            p(400.0, 250.0, Team::Red),
            p(980.0, 300.0, Team::Red),
        ];
        let first = run(&mut players, OffsideRules::default());
        let snapshot = players.clone();
        let second = run(&mut players, OffsideRules::default());
        assert_eq!(first, second);
        assert_eq!(snapshot, players);
        assert_eq!(first.offside_players, vec![0, 1]);
    }

    #[test]
    fn test_offside_set_subset_of_attackers() {
        let mut players = scenario(700.0);
        let decision = run(&mut players, OffsideRules::default());
        for idx in &decision.offside_players {
            assert_eq!(players[*idx].team, Team::Blue);
        }
    }
}
