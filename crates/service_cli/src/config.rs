//! Configuration resolution for the CLI.
//!
//! Precedence: command-line flags, then `FRAUD_*` environment variables,
//! then the TOML file, then built-in defaults. A missing file is not an
//! error; an unreadable or malformed one is.

use crate::Result;
use fraud_stream::config::StreamConfig;
use std::path::Path;

/// Settings supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Timer interval in milliseconds
    pub interval_ms: Option<u64>,
    /// Random seed
    pub seed: Option<u64>,
}

/// Build and validate the effective configuration.
pub fn resolve(path: &Path, overrides: &CliOverrides) -> Result<StreamConfig> {
    let base = if path.exists() {
        StreamConfig::load(path)?
    } else {
        StreamConfig::default()
    };

    let mut config = base.with_env_override();
    if let Some(interval_ms) = overrides.interval_ms {
        config.interval_ms = interval_ms;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}
