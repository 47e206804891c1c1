//! History service: persistent store with in-memory fallback
//!
//! Wraps the configured `HistoryStore` and absorbs its failures. A write
//! that errors or exceeds the bounded timeout lands in a process-local
//! buffer instead, so at least the current session's history stays
//! visible; reads fall back to that buffer when the store is down. There
//! is no reconciliation: records that only ever reached the buffer are
//! not backfilled when the store recovers.

use crate::error::Result;
use crate::storage::{HistoryStore, MemoryHistory};
use crate::types::{PredictionRecord, Sentiment};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

/// Default bound on any single store operation
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Prediction history with best-effort persistence
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    fallback: MemoryHistory,
    store_timeout: Duration,
}

impl HistoryService {
    /// Wrap a persistent store with the default operation timeout
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self::with_timeout(store, DEFAULT_STORE_TIMEOUT)
    }

    /// Wrap a persistent store with an explicit operation timeout
    pub fn with_timeout(store: Arc<dyn HistoryStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            fallback: MemoryHistory::new(),
            store_timeout,
        }
    }

    /// Record one classification
    ///
    /// Never fails: a store error or timeout is logged and the record is
    /// kept in the in-memory fallback instead. Returns the record as
    /// written, timestamped with the current time.
    pub async fn record(&self, text: &str, sentiment: Sentiment) -> PredictionRecord {
        let record = PredictionRecord::new(text, sentiment);

        match timeout(self.store_timeout, self.store.record(&record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!("History write failed, keeping record in memory: {}", e);
                self.keep_in_fallback(&record).await;
            }
            Err(_) => {
                warn!(
                    "History write timed out after {:?}, keeping record in memory",
                    self.store_timeout
                );
                self.keep_in_fallback(&record).await;
            }
        }

        record
    }

    /// List all recorded predictions, newest first
    ///
    /// Reads the persistent store; if that fails or times out, returns the
    /// in-memory fallback's contents instead.
    pub async fn list_all(&self) -> Vec<PredictionRecord> {
        match timeout(self.store_timeout, self.store.list_all()).await {
            Ok(Ok(records)) => records,
            Ok(Err(e)) => {
                warn!("History read failed, serving in-memory fallback: {}", e);
                self.list_fallback().await
            }
            Err(_) => {
                warn!(
                    "History read timed out after {:?}, serving in-memory fallback",
                    self.store_timeout
                );
                self.list_fallback().await
            }
        }
    }

    async fn keep_in_fallback(&self, record: &PredictionRecord) {
        // MemoryHistory::record is infallible in practice
        if let Err(e) = self.fallback.record(record).await {
            warn!("In-memory fallback write failed: {}", e);
        }
    }

    async fn list_fallback(&self) -> Vec<PredictionRecord> {
        self.fallback.list_all().await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MoodlogError;
    use async_trait::async_trait;

    /// Store double that rejects every operation
    struct FailingStore;

    #[async_trait]
    impl HistoryStore for FailingStore {
        async fn record(&self, _record: &PredictionRecord) -> Result<()> {
            Err(MoodlogError::Other("store unreachable".to_string()))
        }

        async fn list_all(&self) -> Result<Vec<PredictionRecord>> {
            Err(MoodlogError::Other("store unreachable".to_string()))
        }

        async fn count(&self) -> Result<usize> {
            Err(MoodlogError::Other("store unreachable".to_string()))
        }
    }

    /// Store double that never completes
    struct HangingStore;

    #[async_trait]
    impl HistoryStore for HangingStore {
        async fn record(&self, _record: &PredictionRecord) -> Result<()> {
            std::future::pending().await
        }

        async fn list_all(&self) -> Result<Vec<PredictionRecord>> {
            std::future::pending().await
        }

        async fn count(&self) -> Result<usize> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_healthy_store_receives_writes() {
        let store = Arc::new(MemoryHistory::new());
        let service = HistoryService::new(store.clone());

        service.record("all good", Sentiment::Positive).await;

        assert_eq!(store.count().await.unwrap(), 1);
        let listed = service.list_all().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_failing_store_falls_back_to_memory() {
        let service = HistoryService::new(Arc::new(FailingStore));

        service.record("kept anyway", Sentiment::Neutral).await;

        let listed = service.list_all().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "kept anyway");
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_memory() {
        let service =
            HistoryService::with_timeout(Arc::new(HangingStore), Duration::from_millis(50));

        service.record("slow store", Sentiment::Negative).await;

        let listed = service.list_all().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "slow store");
    }

    #[tokio::test]
    async fn test_fallback_preserves_newest_first_order() {
        let service = HistoryService::new(Arc::new(FailingStore));

        service.record("first", Sentiment::Neutral).await;
        service.record("second", Sentiment::Neutral).await;
        service.record("third", Sentiment::Neutral).await;

        let listed = service.list_all().await;
        let texts: Vec<&str> = listed.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }
}
