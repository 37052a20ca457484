//! Error handling module for the kdlt CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the kdlt CLI application.
#[derive(Error, Debug)]
pub enum KdltError {
    /// Error when a required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when parsing a KDL document fails.
    #[error("KDL error: {0}")]
    Kdl(#[from] kdl::KdlError),

    /// Error when reading a TOML configuration file fails.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using KdltError.
pub type Result<T> = std::result::Result<T, KdltError>;
