use std::path::Path;

use log::warn;

use crate::ai::monte_carlo::DEFAULT_SIMULATIONS_PER_MOVE;
use crate::engine::OpponentMode;
use crate::error::ConfigError;

/// Deepest alpha-beta search the config accepts.
pub const MAX_SEARCH_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Who plays the second seat.
    pub opponent: OpponentMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            opponent: OpponentMode::HumanVsAlphaBeta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Plies searched, counting the computer's own move.
    pub depth: usize,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        AlphaBetaConfig { depth: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub simulations_per_move: usize,
    /// Fixed RNG seed; `None` seeds from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig {
            simulations_per_move: DEFAULT_SIMULATIONS_PER_MOVE,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub alphabeta: AlphaBetaConfig,
    pub monte_carlo: MonteCarloConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabeta.depth == 0 {
            return Err(ConfigError::Validation(
                "alphabeta.depth must be >= 1".into(),
            ));
        }
        if self.alphabeta.depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "alphabeta.depth must be <= {MAX_SEARCH_DEPTH}"
            )));
        }
        if self.monte_carlo.simulations_per_move == 0 {
            return Err(ConfigError::Validation(
                "monte_carlo.simulations_per_move must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
