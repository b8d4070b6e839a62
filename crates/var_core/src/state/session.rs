//! Match session record
//!
//! A session collects every judged play between an explicit `start` and `end`, in the
//! shape the persistence layer stores: one row per action (offside?, goal?, scoring
//! team, message).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MatchState;
use crate::engine::play_analysis::PlayOutcome;
use crate::error::{Result, VarError};
use crate::models::Team;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub is_offside: bool,
    pub is_goal: bool,
    pub scoring_team: Option<Team>,
    pub message: String,
}

impl PlayRecord {
    pub fn from_outcome(outcome: &PlayOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            is_offside: outcome.result.is_offside,
            is_goal: outcome.result.is_goal,
            scoring_team: outcome.scoring_team,
            message: outcome.result.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Score as of the last recorded play
    pub score: MatchState,
    pub actions: Vec<PlayRecord>,
}

impl MatchSession {
    pub fn start() -> Self {
        Self::start_with(MatchState::default())
    }

    /// Resume from a known score (e.g. a session split across runs)
    pub fn start_with(score: MatchState) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
            score,
            actions: Vec::new(),
        };
        tracing::info!(session = %session.id, "match session started");
        session
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn record(&mut self, outcome: &PlayOutcome) -> Result<&PlayRecord> {
        if !self.is_active() {
            return Err(VarError::InvalidRequest(format!("session {} has already ended", self.id)));
        }
        self.score = outcome.score;
        self.actions.push(PlayRecord::from_outcome(outcome));
        let index = self.actions.len() - 1;
        Ok(&self.actions[index])
    }

    /// Close the session. Ending twice keeps the first timestamp.
    pub fn end(&mut self) {
        if self.ended_at.is_none() {
            self.ended_at = Some(Utc::now());
            tracing::info!(
                session = %self.id,
                actions = self.actions.len(),
                blue = self.score.blue_score,
                red = self.score.red_score,
                "match session ended"
            );
        }
    }

    pub fn goals(&self) -> impl Iterator<Item = &PlayRecord> {
        self.actions.iter().filter(|a| a.is_goal)
    }

    pub fn offsides(&self) -> impl Iterator<Item = &PlayRecord> {
        self.actions.iter().filter(|a| a.is_offside)
    }
}
