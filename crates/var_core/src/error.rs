use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which frame of a play an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameRole {
    /// Single-frame analysis
    Single,
    /// The frame where the ball is received
    Receive,
    /// The frame where the shot is taken
    Shoot,
}

impl fmt::Display for FrameRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameRole::Single => f.write_str("frame"),
            FrameRole::Receive => f.write_str("receive frame"),
            FrameRole::Shoot => f.write_str("shoot frame"),
        }
    }
}

/// Coarse classification of a [`VarError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A detection the play cannot do without (ball, players) is absent
    MissingDetection,
    /// The request itself is malformed
    Input,
    /// Configuration could not be loaded or is inconsistent
    Config,
    /// Engine-side failure (poisoned shared state)
    Internal,
}

#[derive(Error, Debug)]
pub enum VarError {
    #[error("No ball detected in the {frame}")]
    MissingBall { frame: FrameRole },

    #[error("No players detected in the {frame}")]
    NoPlayers { frame: FrameRole },

    #[error("Could not determine the player who received the ball")]
    UnresolvedReceiver,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Match state lock poisoned")]
    StatePoisoned,
}

impl VarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VarError::MissingBall { .. } | VarError::NoPlayers { .. } | VarError::UnresolvedReceiver => {
                ErrorKind::MissingDetection
            }
            VarError::InvalidRequest(_) | VarError::UnsupportedSchema { .. } | VarError::Json(_) => {
                ErrorKind::Input
            }
            VarError::Config(_) | VarError::Yaml(_) | VarError::Io(_) => ErrorKind::Config,
            VarError::StatePoisoned => ErrorKind::Internal,
        }
    }

    /// The frame was unusable; a new capture may succeed where this one failed.
    pub fn is_frame_rejection(&self) -> bool {
        self.kind() == ErrorKind::MissingDetection
    }
}

pub type Result<T> = std::result::Result<T, VarError>;
