//! Moodlog - Rule-Based Sentiment Classification Service
//!
//! A small service that classifies text sentiment with a two-stage
//! rule-based classifier and logs every prediction to a relational
//! history store:
//! - **Phrase matcher**: substring lookup over ordered phrase lists
//! - **Word scorer**: bag-of-words polarity counting with negation rewrites
//! - **History**: append-only SQLite log with an in-memory fallback when
//!   the store is unreachable
//!
//! # Architecture
//!
//! The system is organized into several layers:
//! - **Types**: Core data structures (Sentiment, PredictionRecord)
//! - **Classifier**: Pure, stateless classification of input text
//! - **Storage**: History backends and the fallback-absorbing service
//! - **API**: Axum HTTP surface (/predict, /history, /health)
//!
//! # Example
//!
//! ```ignore
//! use moodlog::{HistoryService, SentimentClassifier, SqliteHistory};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let classifier = SentimentClassifier::builtin();
//!     let store = SqliteHistory::new("sqlite://moodlog.db").await?;
//!     store.run_migrations().await?;
//!
//!     let history = HistoryService::new(Arc::new(store));
//!     let sentiment = classifier.classify("not bad at all");
//!     history.record("not bad at all", sentiment).await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use classifier::{Lexicon, PhraseMatcher, SentimentClassifier, WordScorer};
pub use config::MoodlogConfig;
pub use error::{MoodlogError, Result};
pub use storage::{HistoryService, HistoryStore, MemoryHistory, SqliteHistory};
pub use types::{PredictionId, PredictionRecord, Sentiment};
