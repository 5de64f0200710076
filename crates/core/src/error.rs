//! Error types for the Snowdesk service.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application, including configuration, I/O, corpus, weather,
//! orchestration and journal errors.
//!
//! Note that very few of these ever reach an HTTP caller: the question
//! answering path degrades every fault into answer text.

use thiserror::Error;

/// Unified error type for the Snowdesk service.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus, chunking and retrieval errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Weather service errors
    #[error("Weather error: {0}")]
    Weather(String),

    /// Orchestration errors
    #[error("Agent error: {0}")]
    Agent(String),

    /// Interaction journal errors
    #[error("Journal error: {0}")]
    Journal(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_category() {
        let err = AppError::Knowledge("overlap too large".to_string());
        assert_eq!(err.to_string(), "Knowledge error: overlap too large");

        let err = AppError::Agent("journal task panicked".to_string());
        assert_eq!(err.to_string(), "Agent error: journal task panicked");
    }

    #[test]
    fn test_serde_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: AppError = parse.unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
