use thiserror::Error;

use crate::models::{GroupId, MatchSlot};

/// Error category reported to callers.
///
/// Nothing in the engine is fatal to the process. `Configuration` errors abort
/// the operation before any state is touched; `SimulationData` errors are
/// no-ops that leave the session exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    SimulationData,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TournamentError {
    #[error("Invalid team count: expected {expected}, found {found}")]
    InvalidTeamCount { expected: usize, found: usize },

    #[error("Duplicate team name: {0}")]
    DuplicateTeam(String),

    #[error("Team {name} has rating {rating}, allowed range is {min}..={max}")]
    RatingOutOfRange { name: String, rating: i32, min: i32, max: i32 },

    #[error("Group {group} yielded {found} ranked teams, at least 2 are required")]
    InsufficientQualifiers { group: GroupId, found: usize },

    #[error("Invalid qualifier list: {0}")]
    InvalidQualifiers(String),

    #[error("Prerequisite not met: {0}")]
    MissingPrerequisite(&'static str),

    #[error("Tournament already started, reset the session first")]
    AlreadyStarted,

    #[error("The round of 16 has already been drawn")]
    AlreadyDrawn,

    #[error("The final cannot be played before the third-place match")]
    FinalBeforeThirdPlace,

    #[error("Unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("Unknown fixture {fixture_id} in group {group}")]
    UnknownFixture { group: GroupId, fixture_id: u8 },

    #[error("No match exists at {0}")]
    UnknownMatch(MatchSlot),

    #[error("Match already played: {0}")]
    AlreadyPlayed(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::AlreadyPlayed(_) => ErrorKind::SimulationData,
            _ => ErrorKind::Configuration,
        }
    }

    /// Whether the same call can succeed once the session has moved on
    /// (e.g. after the missing round has been played).
    pub fn is_recoverable(&self) -> bool {
        match self {
            TournamentError::MissingPrerequisite(_) => true,
            TournamentError::FinalBeforeThirdPlace => true,
            TournamentError::UnknownMatch(_) => true,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for TournamentError {
    fn from(err: serde_json::Error) -> Self {
        TournamentError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for TournamentError {
    fn from(err: serde_yaml::Error) -> Self {
        TournamentError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
