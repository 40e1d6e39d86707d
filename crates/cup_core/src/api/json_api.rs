use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::TournamentConfig;
use crate::data::default_teams;
use crate::engine::SimulationMode;
use crate::models::Team;
use crate::session::TournamentSession;
use crate::state::TournamentState;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentRequest {
    pub schema_version: u8,
    pub seed: u64,
    /// Defaults to `realistic`
    #[serde(default)]
    pub mode: Option<SimulationMode>,
    /// Embedded pool when omitted
    #[serde(default)]
    pub teams: Option<Vec<Team>>,
    /// Full config; `seed` and `mode` above still take precedence
    #[serde(default)]
    pub config: Option<TournamentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResponse {
    pub schema_version: u8,
    pub champion: Option<String>,
    pub state: TournamentState,
}

impl TournamentRequest {
    fn into_parts(self) -> (TournamentConfig, Vec<Team>) {
        let mut config = self.config.unwrap_or_default().with_seed(self.seed);
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        (config, self.teams.unwrap_or_else(default_teams))
    }
}

/// Run a whole tournament from a JSON request and return the final snapshot.
///
/// Request: `{"schema_version": 1, "seed": 42, "mode": "advanced", "teams": [...]}`
pub fn simulate_tournament_json(request_json: &str) -> Result<String, String> {
    let request: TournamentRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let (config, teams) = request.into_parts();
    let mut session = TournamentSession::new(config).map_err(|e| e.to_string())?;
    session.seed_groups(teams).map_err(|e| format!("Team validation failed: {}", e))?;
    session.run_to_completion().map_err(|e| format!("Simulation failed: {}", e))?;

    let state = session.snapshot();
    info!(champion = state.champion.as_deref().unwrap_or("-"), "tournament simulated via json api");

    let response = TournamentResponse { schema_version: SCHEMA_VERSION, champion: state.champion.clone(), state };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}
