//! Tournament snapshot
//!
//! A read-only, serializable copy of everything a session knows. Summary and
//! statistics views consume this instead of the live session.

use serde::{Deserialize, Serialize};

use crate::bracket::Bracket;
use crate::engine::SimulationMode;
use crate::group::{Group, Qualifier};
use crate::models::{RatingChange, Team};
use crate::stats::{ChampionJourney, TournamentStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// No teams drawn yet
    Setup,
    GroupStage,
    Knockout,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub phase: TournamentPhase,
    pub seed: u64,
    pub mode: SimulationMode,
    /// Teams with their current ratings
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    pub qualifiers: Vec<Qualifier>,
    pub bracket: Option<Bracket>,
    pub group_stage_complete: bool,
    pub knockout_complete: bool,
    pub champion: Option<String>,
    pub runner_up: Option<String>,
    pub semifinalists: Vec<String>,
    pub rating_history: Vec<RatingChange>,
    pub stats: TournamentStats,
    pub champion_journey: Option<ChampionJourney>,
}

impl TournamentState {
    pub fn is_qualified(&self, team: &str) -> bool {
        self.qualifiers.iter().any(|q| q.team == team)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
