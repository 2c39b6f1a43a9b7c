//! Error types for the anthro_core library.
//!
//! The computation functions never fail; these errors cover reading
//! measurement files, configuration and protocol identifiers.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for anthro_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed measurement input
    #[error("Input error: {0}")]
    Input(String),

    /// Protocol identifier that does not name one of the seven protocols
    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),
}
