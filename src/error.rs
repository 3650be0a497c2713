//! Error types for the form validation layer

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Duplicate check request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Duplicate check endpoint answered with status {0}")]
    OracleStatus(u16),

    #[error("Malformed duplicate check response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid validation endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Unknown field for this form: {0}")]
    UnknownField(String),

    #[error("Submission blocked: {0}")]
    SubmissionBlocked(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// Oracle failures that the controller recovers from by failing open
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::OracleStatus(_) | AppError::MalformedResponse(_)
        )
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
