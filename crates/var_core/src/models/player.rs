//! Detected players
//!
//! A roster is rebuilt from detections every frame. Players have no identity beyond
//! their index in the frame's list, and that index order is what breaks ties.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::Team;
use crate::engine::geometry::Point;

/// Raw output of the player detector: a centroid and a jersey color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerDetection {
    pub position: Point,
    pub team: Team,
}

/// Player as seen by the decision engine within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub position: Point,
    pub team: Team,
    /// Recomputed on every offside pass, meaningless outside the frame it was set in
    #[serde(default)]
    pub is_offside: bool,
}

impl Player {
    pub fn new(position: Point, team: Team) -> Self {
        Self { position, team, is_offside: false }
    }

    pub fn distance_to(&self, point: &Point) -> f64 {
        self.position.distance_to(point)
    }
}

impl From<PlayerDetection> for Player {
    fn from(detection: PlayerDetection) -> Self {
        Player::new(detection.position, detection.team)
    }
}

/// Swap Blue/Red on every player of a frame.
pub fn flip_teams(players: &mut [Player]) {
    for player in players.iter_mut() {
        player.team = player.team.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detection_clears_offside() {
        let det = PlayerDetection { position: Point::new(1.0, 2.0), team: Team::Red };
        let player = Player::from(det);
        assert_eq!(player.team, Team::Red);
        assert_eq!(player.position, Point::new(1.0, 2.0));
        assert!(!player.is_offside);
    }

    #[test]
    fn test_flip_teams_is_uniform() {
        let mut players = vec![
            Player::new(Point::new(0.0, 0.0), Team::Blue),
            Player::new(Point::new(1.0, 0.0), Team::Red),
            Player::new(Point::new(2.0, 0.0), Team::Red),
        ];
        let before: Vec<Team> = players.iter().map(|p| p.team).collect();

        flip_teams(&mut players);

        for (player, original) in players.iter().zip(before.iter()) {
            assert_eq!(player.team, original.opponent());
        }
    }

    #[test]
    fn test_flip_empty_roster() {
        let mut players: Vec<Player> = Vec::new();
        flip_teams(&mut players);
        assert!(players.is_empty());
    }
}
