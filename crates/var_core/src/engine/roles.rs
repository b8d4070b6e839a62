//! Player roles within a single frame
//!
//! - Goalkeeper: the team member nearest the goal that team defends
//! - Last defender (absolute): a team's outfield player nearest its own goal line
//! - Last defender (relative): the defending outfield player furthest toward the
//!   attackers' goal, the one the offside line is drawn through
//! - Receiver: the player nearest the ball
//!
//! Roles are returned as indices into the frame's roster. Ties always go to the player
//! listed first, so results are deterministic for a deterministic detector.

use serde::{Deserialize, Serialize};

use crate::engine::geometry::Point;
use crate::models::{FieldOrientation, FieldSize, Player, Team};

/// Index of the nearest player to `target` among those passing `filter`
fn nearest_index<F>(players: &[Player], target: &Point, filter: F) -> Option<usize>
where
    F: Fn(&Player) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, player) in players.iter().enumerate() {
        if !filter(player) {
            continue;
        }
        let dist = player.distance_to(target);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Member of `team` nearest to `goal_point`
pub fn find_goalkeeper(players: &[Player], team: Team, goal_point: &Point) -> Option<usize> {
    nearest_index(players, goal_point, |p| p.team == team)
}

/// Goalkeeper of `team`, using the goal that team defends on this field
pub fn goalkeeper_of(
    players: &[Player],
    team: Team,
    field: &FieldSize,
    orientation: FieldOrientation,
) -> Option<usize> {
    find_goalkeeper(players, team, &field.goal_point(team, orientation))
}

/// Player nearest the ball (the one who received or holds it)
pub fn find_receiver(players: &[Player], ball: &Point) -> Option<usize> {
    nearest_index(players, ball, |_| true)
}

/// Extreme player of `team` along the orientation axis, skipping `excluded`.
///
/// `want_max` picks the largest coordinate, otherwise the smallest. Only a strictly
/// better coordinate replaces the current pick.
fn extreme_on_axis(
    players: &[Player],
    team: Team,
    excluded: Option<usize>,
    orientation: FieldOrientation,
    want_max: bool,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, player) in players.iter().enumerate() {
        if player.team != team || Some(idx) == excluded {
            continue;
        }
        let coord = orientation.axis_coord(&player.position);
        let better = match best {
            None => true,
            Some((_, current)) if want_max => coord > current,
            Some((_, current)) => coord < current,
        };
        if better {
            best = Some((idx, coord));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Outfield player of `team` nearest its own goal line.
///
/// Blue defends the low end of the axis, so the minimum coordinate; Red the maximum.
pub fn find_last_defender(
    players: &[Player],
    team: Team,
    field: &FieldSize,
    orientation: FieldOrientation,
) -> Option<usize> {
    let goalkeeper = goalkeeper_of(players, team, field, orientation);
    extreme_on_axis(players, team, goalkeeper, orientation, !team.is_blue())
}

/// Outfield defender (opponent of `attacking_team`) furthest toward the attackers' goal.
///
/// A Blue attack runs toward high coordinates, so the defender with the maximum
/// coordinate; a Red attack the minimum.
pub fn find_last_defender_against(
    players: &[Player],
    attacking_team: Team,
    field: &FieldSize,
    orientation: FieldOrientation,
) -> Option<usize> {
    let defending_team = attacking_team.opponent();
    let goalkeeper = goalkeeper_of(players, defending_team, field, orientation);
    extreme_on_axis(players, defending_team, goalkeeper, orientation, attacking_team.is_blue())
}

/// Both goalkeepers and both absolute last defenders of a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoles {
    pub blue_goalkeeper: Option<usize>,
    pub red_goalkeeper: Option<usize>,
    pub blue_last_defender: Option<usize>,
    pub red_last_defender: Option<usize>,
}

impl TeamRoles {
    pub fn identify(players: &[Player], field: &FieldSize, orientation: FieldOrientation) -> Self {
        let roles = Self {
            blue_goalkeeper: goalkeeper_of(players, Team::Blue, field, orientation),
            red_goalkeeper: goalkeeper_of(players, Team::Red, field, orientation),
            blue_last_defender: find_last_defender(players, Team::Blue, field, orientation),
            red_last_defender: find_last_defender(players, Team::Red, field, orientation),
        };
        if roles.blue_goalkeeper.is_none() || roles.red_goalkeeper.is_none() {
            tracing::warn!(?roles, "a team has no detected players, roles degraded");
        }
        roles
    }

    pub fn goalkeeper(&self, team: Team) -> Option<usize> {
        match team {
            Team::Blue => self.blue_goalkeeper,
            Team::Red => self.red_goalkeeper,
        }
    }

    pub fn last_defender(&self, team: Team) -> Option<usize> {
        match team {
            Team::Blue => self.blue_last_defender,
            Team::Red => self.red_last_defender,
        }
    }
}
