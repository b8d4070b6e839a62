//! Team labels
//!
//! Fixed convention: Blue defends the left (Horizontal) or top (Vertical) goal,
//! Red defends the right or bottom goal. A reversed match is expressed by flipping
//! the labels on every detected player, never by moving the goals.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Opposing team
    #[inline]
    pub fn opponent(&self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    #[inline]
    pub fn is_blue(&self) -> bool {
        matches!(self, Team::Blue)
    }

    /// Whether `candidate` is further downfield than `reference` from this team's
    /// point of view (Blue advances toward higher coordinates, Red toward lower).
    #[inline]
    pub fn is_ahead(&self, candidate: f64, reference: f64) -> bool {
        match self {
            Team::Blue => candidate > reference,
            Team::Red => candidate < reference,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
