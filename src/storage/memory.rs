//! In-memory history backend
//!
//! Backs two things: the process-local fallback buffer used when the
//! persistent store is unreachable, and a lightweight store for tests.
//! Appends go to the end of the vector; reads return a reversed clone so
//! callers always see newest-first.

use crate::error::Result;
use crate::storage::HistoryStore;
use crate::types::PredictionRecord;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-memory history store
#[derive(Default)]
pub struct MemoryHistory {
    records: RwLock<Vec<PredictionRecord>>,
}

impl MemoryHistory {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn record(&self, record: &PredictionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PredictionRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().rev().cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        let records = self.records.read().await;
        Ok(records.len())
    }
}
