//! Error types for the sv-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("System not found: {0}")]
    SystemNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sv-app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The bearer token was rejected; a refresh may help.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<sv_config::ConfigError> for AppError {
    fn from(err: sv_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<sv_config::ValidationError> for AppError {
    fn from(err: sv_config::ValidationError) -> Self {
        match err {
            sv_config::ValidationError::UnknownSystem(name) => AppError::SystemNotFound(name),
            other => AppError::Config(other.to_string()),
        }
    }
}

impl From<sv_core::CoreError> for AppError {
    fn from(err: sv_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
