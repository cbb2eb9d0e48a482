//! Configuration system for TourForge.
//!
//! Load search configuration from TOML or YAML files to control the time
//! budget, random seed and fixing strategy without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use tourforge_config::SearchConfig;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     random_seed = 42
//!     time_limit_secs = 600.0
//!
//!     [strategy]
//!     type = "adaptive"
//!     probabilities = [0.9, 0.8, 0.7, 0.5]
//!     stagnation_limit = 3
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(42));
//! config.validate().unwrap();
//! ```
//!
//! Use the default config when no file is given:
//!
//! ```
//! use tourforge_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default total time budget in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: f64 = 1800.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Random seed for reproducible fixing decisions.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Total wall-clock budget in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: f64,

    /// Fixing strategy.
    #[serde(default)]
    pub strategy: StrategyConfig,
}

fn default_time_limit() -> f64 {
    DEFAULT_TIME_LIMIT_SECS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            random_seed: None,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            strategy: StrategyConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// The time budget as a [`Duration`].
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs_f64(self.time_limit_secs)
    }

    /// Checks the configuration for values the search cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for probabilities outside `[0, 1]`,
    /// an empty or increasing adaptive schedule, a zero round count or a
    /// non-positive time budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.time_limit_secs.is_finite() || self.time_limit_secs <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "time_limit_secs must be positive, got {}",
                self.time_limit_secs
            )));
        }
        match &self.strategy {
            StrategyConfig::Fixed {
                probability,
                rounds,
            } => {
                check_probability(*probability)?;
                if *rounds == 0 {
                    return Err(ConfigError::Invalid("rounds must be at least 1".into()));
                }
            }
            StrategyConfig::Adaptive {
                probabilities,
                stagnation_limit,
                ..
            } => {
                if probabilities.is_empty() {
                    return Err(ConfigError::Invalid(
                        "adaptive schedule needs at least one probability".into(),
                    ));
                }
                for &p in probabilities {
                    check_probability(p)?;
                }
                if probabilities.windows(2).any(|w| w[1] > w[0]) {
                    return Err(ConfigError::Invalid(
                        "adaptive schedule must be non-increasing".into(),
                    ));
                }
                if *stagnation_limit == 0 {
                    return Err(ConfigError::Invalid(
                        "stagnation_limit must be at least 1".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn check_probability(p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::Invalid(format!(
            "probability must be in [0, 1], got {p}"
        )));
    }
    Ok(())
}

/// How the fixing probability and termination evolve across rounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Constant probability, fixed round count, time sliced evenly up front.
    Fixed {
        #[serde(default = "default_probability")]
        probability: f64,
        #[serde(default = "default_rounds")]
        rounds: u32,
    },
    /// Descending probability schedule advanced on stagnation; each round
    /// gets the full remaining budget as its time slice.
    Adaptive {
        #[serde(default = "default_schedule")]
        probabilities: Vec<f64>,
        /// Rounds without sufficient relative improvement before the
        /// schedule cursor advances.
        #[serde(default = "default_stagnation_limit")]
        stagnation_limit: u32,
        /// Minimum relative improvement (`1 - objval/objbest`) for a round
        /// to not count as stagnated. Assumes positive minimization
        /// objectives.
        #[serde(default = "default_min_improvement")]
        min_improvement: f64,
    },
}

fn default_probability() -> f64 {
    0.9
}

fn default_rounds() -> u32 {
    10
}

fn default_schedule() -> Vec<f64> {
    vec![0.9, 0.8, 0.7, 0.5]
}

fn default_stagnation_limit() -> u32 {
    3
}

fn default_min_improvement() -> f64 {
    0.02
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::Fixed {
            probability: default_probability(),
            rounds: default_rounds(),
        }
    }
}
