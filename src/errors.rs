//! Error types for netpredict
//!
//! Two categories reach the user: the server being unreachable and a
//! prediction request failing. Everything else is plumbing.

use thiserror::Error;

/// Message shown when the liveness probe (or its retry) fails
pub const SERVER_OFFLINE_MESSAGE: &str =
    "Server is currently offline. Please try again in a moment.";

/// Main error type for the predictor client
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Liveness probe or retry probe failed
    #[error("{}", SERVER_OFFLINE_MESSAGE)]
    ServerOffline,

    /// Liveness probe could not reach the server or got a non-2xx answer
    /// (cause kept for diagnostics)
    #[error("Liveness probe failed: {0}")]
    ProbeFailed(String),

    /// `/format` answered with a non-2xx status
    #[error("Format description unavailable: {0}")]
    FormatUnavailable(String),

    /// Classification request failed (status code or underlying message)
    #[error("{0}")]
    PredictionFailed(String),

    /// State machine transition errors
    #[error("Invalid state transition from {from} via {event}: {reason}")]
    InvalidTransition {
        from: String,
        event: String,
        reason: String,
    },

    /// Session was disposed while an operation was in flight
    #[error("Operation cancelled")]
    Cancelled,

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Line editor errors
    #[error("Readline error: {0}")]
    ReadlineError(#[from] rustyline::error::ReadlineError),
}

impl PredictorError {
    /// Whether this error is one of the two categories rendered in the
    /// result panel.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            PredictorError::ServerOffline | PredictorError::PredictionFailed(_)
        )
    }
}

/// Result type alias for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;
