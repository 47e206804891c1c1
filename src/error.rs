//! Error types for the moodlog sentiment service
//!
//! This module provides structured error handling using thiserror for
//! error definitions and anyhow for error propagation.

use thiserror::Error;

/// Main error type for moodlog operations
#[derive(Error, Debug)]
pub enum MoodlogError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Lexicon file could not be read or parsed
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Sentiment label not one of Positive/Negative/Neutral
    #[error("Invalid sentiment label: {0}")]
    InvalidSentiment(String),

    /// Invalid prediction ID format
    #[error("Invalid prediction ID: {0}")]
    InvalidPredictionId(#[from] uuid::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for moodlog operations
pub type Result<T> = std::result::Result<T, MoodlogError>;

/// Convert anyhow::Error to MoodlogError
impl From<anyhow::Error> for MoodlogError {
    fn from(err: anyhow::Error) -> Self {
        MoodlogError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MoodlogError::InvalidSentiment("Mixed".to_string());
        assert_eq!(err.to_string(), "Invalid sentiment label: Mixed");
    }

    #[test]
    fn test_error_conversion() {
        let uuid_err = uuid::Uuid::parse_str("invalid");
        assert!(uuid_err.is_err());

        let moodlog_err: MoodlogError = uuid_err.unwrap_err().into();
        assert!(matches!(moodlog_err, MoodlogError::InvalidPredictionId(_)));
    }
}
