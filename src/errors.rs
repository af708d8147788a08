//! Unified application error type.
//! All modules (core, pd, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Input errors (fatal)
    // ---------------------------
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ---------------------------
    // Per-row errors (recorded, never fatal)
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote request failed: {message}")]
    RemoteRequest {
        message: String,
        status: Option<u16>,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Remote failure with no HTTP status (transport-level problems).
    pub fn remote<S: Into<String>>(message: S) -> Self {
        AppError::RemoteRequest {
            message: message.into(),
            status: None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
