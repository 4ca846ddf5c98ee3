//! Error types for reader storage and configuration.

use thiserror::Error;

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Errors that can occur while recording history or loading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Identifier contains the record delimiter: {0}")]
    DelimitedIdentifier(String),

    #[error("Identifier is reserved for the history index: {0}")]
    ReservedIdentifier(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid reader settings: {0}")]
    SettingsError(String),
}

impl From<serde_json::Error> for ReaderError {
    fn from(e: serde_json::Error) -> Self {
        ReaderError::ConfigError(e.to_string())
    }
}
