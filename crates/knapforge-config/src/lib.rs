//! Configuration system for knapforge.
//!
//! Load solver configuration from TOML or YAML files to control search
//! limits, warm starting and sensitivity sweeps without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use knapforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     warm_start = false
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     node_limit = 1000000
//!
//!     [sensitivity]
//!     parallel = true
//! "#).unwrap();
//!
//! assert!(!config.warm_start);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.node_limit(), Some(1_000_000));
//! assert!(config.sensitivity.parallel);
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use knapforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("knapforge.toml").unwrap_or_default();
//! assert!(config.warm_start);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name looked up by the facade and the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "knapforge.toml";

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

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Seed the incumbent with the greedy heuristic before searching.
    #[serde(default = "default_warm_start")]
    pub warm_start: bool,

    /// Search limits. Absent means "search until optimality is proven".
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Budget sweep settings.
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

fn default_warm_start() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            warm_start: default_warm_start(),
            termination: None,
            sensitivity: SensitivityConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`SolverConfig::validate`].
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
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a file, picking the format from its extension
    /// (`.yaml`/`.yml` for YAML, anything else for TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Rejects limits that would stop the search before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(termination) = &self.termination {
            if termination.node_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "termination.node_limit must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Enables or disables the greedy warm start.
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of node expansions.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Runs sensitivity sweeps on the rayon thread pool.
    pub fn with_parallel_sensitivity(mut self, parallel: bool) -> Self {
        self.sensitivity.parallel = parallel;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the node expansion ceiling, if configured.
    pub fn node_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_limit)
    }
}

/// Termination configuration.
///
/// Any configured limit makes the result non-certified when it fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of node expansions.
    pub node_limit: Option<u64>,

    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Additional milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// Seconds and milliseconds add up; a total of zero means no limit.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

/// Sensitivity sweep configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SensitivityConfig {
    /// Solve budget points on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

#[cfg(test)]
mod tests;
