//! Runtime configuration.
//!
//! Defaults come from [`crate::core::constants`]. A JSON file can override
//! them, and the binaries apply command-line flags on top of that.

use crate::core::constants::{
    FRAME_POLL_MS, MAX_FRAME_POLL_MS, MAX_TICK_INTERVAL_MS, MIN_FRAME_POLL_MS,
    MIN_TICK_INTERVAL_MS, TICK_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick interval {0}ms outside 10..=10000ms")]
    InvalidTickInterval(u64),

    #[error("frame poll {0}ms outside 10..=1000ms")]
    InvalidFramePoll(u64),

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Period of the decay timer
    pub tick_interval_ms: u64,
    /// How long the terminal loop waits for a key before redrawing
    pub frame_poll_ms: u64,
    pub log_level: String,
    /// Log destination for the terminal front end (nothing is logged without one)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            frame_poll_ms: FRAME_POLL_MS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Reads and validates a JSON config file. Missing keys keep defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::InvalidTickInterval(self.tick_interval_ms));
        }
        if !(MIN_FRAME_POLL_MS..=MAX_FRAME_POLL_MS).contains(&self.frame_poll_ms) {
            return Err(ConfigError::InvalidFramePoll(self.frame_poll_ms));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_poll(&self) -> Duration {
        Duration::from_millis(self.frame_poll_ms)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.frame_poll(), Duration::from_millis(50));
        assert_eq!(config.log_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"tick_interval_ms": 250}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.frame_poll_ms, 50);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_rejects_out_of_range_tick() {
        let err = Config::from_json(r#"{"tick_interval_ms": 1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickInterval(1)));
    }

    #[test]
    fn test_rejects_out_of_range_frame_poll() {
        let err = Config::from_json(r#"{"frame_poll_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFramePoll(0)));
        let err = Config::from_json(r#"{"frame_poll_ms": 3600000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFramePoll(3_600_000)));
        assert!(Config::from_json(r#"{"frame_poll_ms": 10}"#).is_ok());
        assert!(Config::from_json(r#"{"frame_poll_ms": 1000}"#).is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let err = Config::from_json(r#"{"log_level": "chatty"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Config::from_json("{tick"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
