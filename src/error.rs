//! Error types and handling infrastructure for prodtui.
//!
//! This module provides a centralized error type using `thiserror` for failures that end the
//! session (terminal setup, configuration, a lost worker). Failures of individual catalog
//! requests are *not* represented here: they are ordinary outcomes carried back to the
//! controller as [`ApiError`](crate::catalog::ApiError) values and shown on screen.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for prodtui operations.
#[derive(Error, Debug)]
pub enum ProdtuiError {
    /// Terminal I/O failures (raw mode, alternate screen, drawing)
    #[error("UI operation failed: {message}")]
    UIError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file could not be read
    #[error("Configuration file not readable: {path}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration content or a configuration value is invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {message}")]
    ClientSetup { message: String },

    /// The API worker stopped while the controller still had requests for it
    #[error("API worker unavailable")]
    WorkerUnavailable,
}

/// Standard Result type for prodtui operations.
pub type Result<T> = std::result::Result<T, ProdtuiError>;

impl ProdtuiError {
    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a ClientSetup error with a descriptive message
    pub fn client_setup(message: impl Into<String>) -> Self {
        Self::ClientSetup {
            message: message.into(),
        }
    }
}

// Terminal operations are the only io-heavy part of the crate.
impl From<std::io::Error> for ProdtuiError {
    fn from(err: std::io::Error) -> Self {
        Self::UIError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}
