//! # Tournament Configuration
//!
//! 모든 튜닝 상수를 한 곳에서 관리하는 설정.
//!
//! ```rust
//! use cup_core::config::TournamentConfig;
//!
//! let config = TournamentConfig::default();
//! let arcade = TournamentConfig::arcade().with_seed(7);
//! assert!(arcade.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::engine::{RatingModel, SimulationMode, K_FACTOR, SHOOTOUT_MAX_ATTEMPTS};
use crate::error::{Result, TournamentError};
use crate::models::DEFAULT_RATING;

/// Environment variable naming a YAML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "CUP_CONFIG_PATH";

pub const DEFAULT_SEED: u64 = 42;
pub const MIN_RATING: i32 = 800;
pub const MAX_RATING: i32 = 2500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub mode: SimulationMode,
    /// Every random draw of a session derives from this seed
    pub seed: u64,
    pub k_factor: f64,
    /// Rating used when a team cannot be found
    pub default_rating: i32,
    /// Accepted input rating range
    pub min_rating: i32,
    pub max_rating: i32,
    pub shootout_max_attempts: u32,
    /// Simulate batch knockout rounds on the rayon pool
    pub parallel_rounds: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            mode: SimulationMode::Realistic,
            seed: DEFAULT_SEED,
            k_factor: K_FACTOR,
            default_rating: DEFAULT_RATING,
            min_rating: MIN_RATING,
            max_rating: MAX_RATING,
            shootout_max_attempts: SHOOTOUT_MAX_ATTEMPTS,
            parallel_rounds: true,
        }
    }
}

impl TournamentConfig {
    /// Elo + Poisson (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 레이팅 무시, 완전 랜덤
    pub fn arcade() -> Self {
        Self { mode: SimulationMode::Uniform, ..Self::default() }
    }

    /// 폼 + 라운드 중요도 + 이변
    pub fn advanced() -> Self {
        Self { mode: SimulationMode::Advanced, ..Self::default() }
    }

    /// Sequential, fixed seed
    pub fn for_tests(seed: u64) -> Self {
        Self { seed, parallel_rounds: false, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_mode(mut self, mode: SimulationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn rating_model(&self) -> RatingModel {
        RatingModel::new(self.k_factor)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return Err(TournamentError::InvalidConfig(format!(
                "k_factor must be positive, got {}",
                self.k_factor
            )));
        }
        if self.min_rating > self.max_rating {
            return Err(TournamentError::InvalidConfig(format!(
                "min_rating {} exceeds max_rating {}",
                self.min_rating, self.max_rating
            )));
        }
        if self.shootout_max_attempts == 0 {
            return Err(TournamentError::InvalidConfig("shootout_max_attempts must be at least 1".into()));
        }
        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.json` file as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TournamentError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Config from the file named by [`CONFIG_PATH_ENV`], if set.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Self::from_path(Path::new(path)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.mode, SimulationMode::Realistic);
        assert_eq!(config.k_factor, 20.0);
        assert_eq!(config.default_rating, 1600);
        assert_eq!(config.shootout_max_attempts, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TournamentConfig::from_yaml_str("mode: advanced\nseed: 2022\n").unwrap();
        assert_eq!(config.mode, SimulationMode::Advanced);
        assert_eq!(config.seed, 2022);
        assert_eq!(config.k_factor, K_FACTOR);
        assert!(config.parallel_rounds);
    }

    #[test]
    fn test_json_config() {
        let config = TournamentConfig::from_json_str(r#"{"mode": "weighted", "parallel_rounds": false}"#).unwrap();
        assert_eq!(config.mode, SimulationMode::Weighted);
        assert!(!config.parallel_rounds);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(TournamentConfig::from_yaml_str("k_factor: -1.0").is_err());
        assert!(TournamentConfig::from_yaml_str("min_rating: 3000").is_err());
        assert!(TournamentConfig::from_yaml_str("shootout_max_attempts: 0").is_err());
        assert!(matches!(
            TournamentConfig::from_yaml_str("mode: chaos"),
            Err(TournamentError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TournamentConfig::from_path(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, TournamentError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_env_loads_the_named_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "mode: uniform\nseed: 404\nparallel_rounds: false").unwrap();

        env::set_var(CONFIG_PATH_ENV, file.path());
        let loaded = TournamentConfig::from_env();
        env::set_var(CONFIG_PATH_ENV, "   ");
        let blank = TournamentConfig::from_env();
        env::remove_var(CONFIG_PATH_ENV);

        let config = loaded.unwrap().unwrap();
        assert_eq!(config.mode, SimulationMode::Uniform);
        assert_eq!(config.seed, 404);
        assert!(!config.parallel_rounds);
        assert_eq!(blank.unwrap(), None);
        assert_eq!(TournamentConfig::from_env().unwrap(), None);
    }
}
