//! Stream configuration management.
//!
//! Handles loading stream configuration from TOML files with environment
//! variable override support.

use fraud_core::store::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "fraud_tracker.toml";

const MAX_CAPACITY: usize = 1_000_000;
const MAX_INTERVAL_MS: u64 = 3_600_000;
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more invalid settings
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Stream configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Event buffer capacity
    pub buffer_capacity: usize,
    /// Events generated silently at startup
    pub prepopulate: usize,
    /// Timer interval in milliseconds
    pub interval_ms: u64,
    /// Seed for a reproducible stream
    pub seed: Option<u64>,
    /// Regions shown on the leaderboard
    pub top_regions: usize,
    /// Events fetched for the initial ticker fill
    pub latest_events: usize,
    /// Maximum ticker entries
    pub ticker_length: usize,
    /// Log level
    pub log_level: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_CAPACITY,
            prepopulate: 50,
            interval_ms: 1000,
            seed: None,
            top_regions: 5,
            latest_events: 10,
            ticker_length: 20,
            log_level: "info".to_string(),
        }
    }
}

impl StreamConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from the default path or return the default config
    pub fn load_or_default() -> Self {
        Self::load(&PathBuf::from(DEFAULT_CONFIG_PATH)).unwrap_or_default()
    }

    /// Apply environment variable overrides.
    ///
    /// Unparsable values are logged and leave the current setting in place.
    pub fn with_env_override(mut self) -> Self {
        override_from_env("FRAUD_BUFFER_CAPACITY", &mut self.buffer_capacity);
        override_from_env("FRAUD_PREPOPULATE", &mut self.prepopulate);
        override_from_env("FRAUD_INTERVAL_MS", &mut self.interval_ms);
        override_from_env("FRAUD_TOP_REGIONS", &mut self.top_regions);
        override_from_env("FRAUD_LATEST_EVENTS", &mut self.latest_events);
        override_from_env("FRAUD_TICKER_LENGTH", &mut self.ticker_length);

        if let Ok(seed) = std::env::var("FRAUD_SEED") {
            match seed.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!(value = %seed, "Ignoring invalid FRAUD_SEED"),
            }
        }

        if let Ok(log_level) = std::env::var("FRAUD_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.buffer_capacity == 0 {
            errors.push("buffer_capacity must be greater than 0".to_string());
        }
        if self.buffer_capacity > MAX_CAPACITY {
            errors.push(format!(
                "buffer_capacity {} exceeds maximum allowed ({})",
                self.buffer_capacity, MAX_CAPACITY
            ));
        }

        if self.prepopulate > MAX_CAPACITY {
            errors.push(format!(
                "prepopulate {} exceeds maximum allowed ({})",
                self.prepopulate, MAX_CAPACITY
            ));
        }

        if self.interval_ms == 0 || self.interval_ms > MAX_INTERVAL_MS {
            errors.push(format!(
                "interval_ms {} must be between 1 and {}",
                self.interval_ms, MAX_INTERVAL_MS
            ));
        }

        for (name, value) in [
            ("top_regions", self.top_regions),
            ("latest_events", self.latest_events),
            ("ticker_length", self.ticker_length),
        ] {
            if value == 0 {
                errors.push(format!("{} must be greater than 0", name));
            }
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Timer interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn override_from_env<T: FromStr>(key: &str, slot: &mut T) {
    if let Ok(raw) = std::env::var(key) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(key, value = %raw, "Ignoring invalid environment override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.buffer_capacity, 1000);
        assert_eq!(config.prepopulate, 50);
        assert_eq!(config.interval(), Duration::from_millis(1000));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("FRAUD_INTERVAL_MS", "250");
        std::env::set_var("FRAUD_SEED", "77");
        std::env::set_var("FRAUD_TOP_REGIONS", "not-a-number");

        let config = StreamConfig::default().with_env_override();
        assert_eq!(config.interval_ms, 250);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.top_regions, 5);

        std::env::remove_var("FRAUD_INTERVAL_MS");
        std::env::remove_var("FRAUD_SEED");
        std::env::remove_var("FRAUD_TOP_REGIONS");
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buffer_capacity = 200\nseed = 9\nlog_level = \"debug\"").unwrap();

        let config = StreamConfig::load(file.path()).unwrap();
        assert_eq!(config.buffer_capacity, 200);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.prepopulate, 50);
    }

    #[test]
    fn test_load_missing_file() {
        let result = StreamConfig::load(Path::new("/nonexistent/fraud_tracker.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buffer_capacity = \"lots\"").unwrap();

        let result = StreamConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let config = StreamConfig {
            log_level: "loud".to_string(),
            ..StreamConfig::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("log_level")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_log_levels_case_insensitive() {
        for level in ["trace", "DEBUG", "Info", "warn", "error"] {
            let config = StreamConfig {
                log_level: level.to_string(),
                ..StreamConfig::default()
            };
            assert!(config.validate().is_ok(), "Log level '{}' should be valid", level);
        }
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = StreamConfig {
            buffer_capacity: 0,
            interval_ms: 0,
            top_regions: 0,
            ticker_length: 0,
            ..StreamConfig::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| e.contains("buffer_capacity")));
                assert!(errors.iter().any(|e| e.contains("interval_ms")));
                assert!(errors.iter().any(|e| e.contains("top_regions")));
                assert!(errors.iter().any(|e| e.contains("ticker_length")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_upper_bounds() {
        let config = StreamConfig {
            buffer_capacity: 2_000_000,
            interval_ms: MAX_INTERVAL_MS + 1,
            ..StreamConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_load_with_env_and_validate_rejects_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticker_length = 0").unwrap();

        let result = StreamConfig::load_with_env_and_validate(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
