//! Error types for the fraud event stream.

use fraud_core::geography::GeographyError;
use thiserror::Error;

/// Stream error type
#[derive(Debug, Error)]
pub enum StreamError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Geography table error
    #[error("Geography error: {0}")]
    Geography(#[from] GeographyError),

    /// `start` was called outside a tokio runtime
    #[error("Stream timer requires a running tokio runtime")]
    NoRuntime,

    /// Tick interval of zero
    #[error("Stream interval must be greater than zero")]
    InvalidInterval,
}
