//! Configuration system for LineupForge.
//!
//! Load engine configuration from TOML or YAML files to control per-solve
//! limits without code changes. Domain inputs (the player pool and run
//! settings) are data, not configuration, and live in `lineupforge-core`.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use lineupforge_config::EngineConfig;
//! use std::time::Duration;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [solve]
//!     node_limit = 500000
//!     seconds_limit = 5
//! "#).unwrap();
//!
//! assert_eq!(config.solve.node_limit, Some(500_000));
//! assert_eq!(config.solve_time_limit(), Some(Duration::from_secs(5)));
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use lineupforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("engine.toml").unwrap_or_default();
//! // Proceeds with unlimited solves if the file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Per-solve limit configuration.
    #[serde(default)]
    pub solve: SolveLimits,
}

/// Limits applied to every individual solve of a run.
///
/// Hitting a limit mid-run ends the run early with the lineups produced so
/// far, the same way an infeasible iteration does.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolveLimits {
    /// Maximum branch-and-bound nodes per solve.
    #[serde(default)]
    pub node_limit: Option<u64>,

    /// Maximum wall-clock seconds per solve.
    #[serde(default)]
    pub seconds_limit: Option<u64>,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
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

    /// Sets the per-solve node limit.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.solve.node_limit = Some(limit);
        self
    }

    /// Sets the per-solve time limit in seconds.
    pub fn with_seconds_limit(mut self, seconds: u64) -> Self {
        self.solve.seconds_limit = Some(seconds);
        self
    }

    /// The per-solve time limit as a duration, if configured.
    pub fn solve_time_limit(&self) -> Option<Duration> {
        self.solve.seconds_limit.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let config = EngineConfig::default();
        assert_eq!(config.solve.node_limit, None);
        assert_eq!(config.solve_time_limit(), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::new()
            .with_node_limit(1_000)
            .with_seconds_limit(30);
        let text = toml::to_string(&config).unwrap();
        let parsed = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.solve.node_limit, Some(1_000));
        assert_eq!(parsed.solve_time_limit(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_yaml_parse() {
        let config = EngineConfig::from_yaml_str("solve:\n  node_limit: 42\n").unwrap();
        assert_eq!(config.solve.node_limit, Some(42));
        assert_eq!(config.solve.seconds_limit, None);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = EngineConfig::load("does-not-exist.toml").unwrap_or_default();
        assert_eq!(config.solve.node_limit, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.solve.node_limit, None);
    }
}
