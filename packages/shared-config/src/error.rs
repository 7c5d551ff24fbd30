//! Configuration error types

use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is set but does not parse
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// A connection string has the wrong shape
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),

    /// Individually valid values that conflict with each other
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
