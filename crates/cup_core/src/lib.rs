//! # cup_core - Deterministic 32-Team Tournament Simulation Engine
//!
//! This library runs a full international cup: eight groups of four drawn from
//! rating pots, a round-robin group stage, and a fixed-bracket knockout stage
//! from the round of 16 to the final, with Elo ratings updated after every match.
//!
//! ## Features
//! - Deterministic simulation (same seed = same tournament)
//! - Four score models: uniform, rating-weighted, Elo + Poisson, advanced
//! - Penalty shootouts that always produce a winner
//! - Batch rounds on the rayon pool without losing determinism
//! - JSON API and YAML/JSON configuration

pub mod api;
pub mod bracket;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod group;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;

// Re-export main API functions
pub use api::{simulate_tournament_json, TournamentRequest, TournamentResponse, SCHEMA_VERSION};
pub use error::{ErrorKind, Result, TournamentError};

pub use bracket::{draw_round_of_16, Bracket, BracketHalf, RoundStatus};
pub use config::TournamentConfig;
pub use data::{default_teams, find_team, team_pool};
pub use engine::{MatchInput, MatchSimulator, RatingModel, SimulationMode, SituationalFactors};
pub use group::{qualify, seed_groups, sort_standings, Group, Qualifier};
pub use models::{
    FixtureResult, GroupFixture, GroupId, Half, KnockoutMatch, KnockoutOutcome, KnockoutResult, MatchKind,
    MatchSlot, MatchSummary, RatingChange, Round, Shootout, Side, Team, TeamStanding,
};
pub use session::{RoundReport, TournamentSession};
pub use state::{TournamentPhase, TournamentState};
pub use stats::{champion_journey, ChampionJourney, JourneyStep, TournamentStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
