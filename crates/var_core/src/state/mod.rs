//! Match state
//!
//! `MatchState` is the cumulative score. It is owned by the caller and passed by
//! reference into every play; the engine only ever increments it. `SharedMatchState`
//! wraps it for plays evaluated on several threads at once.

pub mod session;

pub use session::{MatchSession, PlayRecord};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::error::{Result, VarError};
use crate::models::Team;

/// Session-wide score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchState {
    pub blue_score: u32,
    pub red_score: u32,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue_score,
            Team::Red => self.red_score,
        }
    }

    /// Credit one goal to `team`
    pub fn record_goal(&mut self, team: Team) {
        let slot = match team {
            Team::Blue => &mut self.blue_score,
            Team::Red => &mut self.red_score,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total_goals(&self) -> u32 {
        self.blue_score.saturating_add(self.red_score)
    }
}

/// Score shared across threads.
///
/// Cloning shares the same underlying score.
#[derive(Debug, Clone, Default)]
pub struct SharedMatchState {
    inner: Arc<Mutex<MatchState>>,
}

impl SharedMatchState {
    pub fn new(initial: MatchState) -> Self {
        Self { inner: Arc::new(Mutex::new(initial)) }
    }

    pub fn snapshot(&self) -> Result<MatchState> {
        self.inner.lock().map(|state| *state).map_err(|_| VarError::StatePoisoned)
    }

    /// Increment `team` and return the score right after, in one locked section
    pub fn record_goal(&self, team: Team) -> Result<MatchState> {
        let mut state = self.inner.lock().map_err(|_| VarError::StatePoisoned)?;
        state.record_goal(team);
        Ok(*state)
    }
}
