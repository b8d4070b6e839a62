pub mod field;
pub mod player;
pub mod team;

pub use field::{FieldOrientation, FieldSize};
pub use player::{flip_teams, Player, PlayerDetection};
pub use team::Team;
