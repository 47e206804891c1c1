//! Core data types for the moodlog sentiment service
//!
//! This module defines the fundamental data structures used throughout moodlog:
//! sentiment labels, prediction identifiers, and the prediction records that
//! make up the history log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentiment label produced by the classifier
///
/// Serializes to exactly `"Positive"`, `"Negative"` or `"Neutral"`, which is
/// also the textual form stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Stable textual form used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = crate::error::MoodlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(crate::error::MoodlogError::InvalidSentiment(
                other.to_string(),
            )),
        }
    }
}

/// Unique identifier for prediction records
///
/// Wraps a UUID to provide type safety and prevent mixing prediction IDs
/// with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(pub Uuid);

impl PredictionId {
    /// Create a new random prediction ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a prediction ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PredictionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PredictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One classified input, as it appears in the history log
///
/// Records are immutable once stored. History is append-only and is always
/// read back ordered by `created_at`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Unique record ID
    pub id: PredictionId,

    /// The input text exactly as received
    pub text: String,

    /// Label assigned by the classifier
    pub sentiment: Sentiment,

    /// When the classification happened
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    /// Build a record for a freshly classified input, stamped with the
    /// current time.
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            id: PredictionId::new(),
            text: text.into(),
            sentiment,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sentiment_round_trip() {
        for s in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            assert_eq!(Sentiment::from_str(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn test_sentiment_rejects_unknown_label() {
        assert!(Sentiment::from_str("positive").is_err());
        assert!(Sentiment::from_str("").is_err());
    }

    #[test]
    fn test_sentiment_json_form() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"Positive\"");
    }

    #[test]
    fn test_prediction_ids_are_unique() {
        assert_ne!(PredictionId::new(), PredictionId::new());
    }
}
