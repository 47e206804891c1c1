//! Storage layer for the prediction history
//!
//! Provides the `HistoryStore` abstraction, a SQLite implementation, an
//! in-memory implementation, and the `HistoryService` wrapper that gives
//! callers best-effort persistence with an in-memory fallback.

pub mod memory;
pub mod service;
pub mod sqlite;

pub use memory::MemoryHistory;
pub use service::HistoryService;
pub use sqlite::SqliteHistory;

use crate::error::Result;
use crate::types::PredictionRecord;
use async_trait::async_trait;

/// History backend trait
///
/// History is append-only: there is deliberately no update or delete
/// operation.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one prediction record
    async fn record(&self, record: &PredictionRecord) -> Result<()>;

    /// List all records, newest first
    async fn list_all(&self) -> Result<Vec<PredictionRecord>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
