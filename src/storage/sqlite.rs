//! SQLite history backend
//!
//! Persistent storage for prediction records using SQLite. The table is
//! append-only; the only queries are a single-row insert and a
//! newest-first scan.

use crate::error::Result;
use crate::storage::HistoryStore;
use crate::types::{PredictionId, PredictionRecord, Sentiment};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::{ConnectOptions, Row};
use std::str::FromStr;
use tracing::info;

/// SQLite-backed history store
pub struct SqliteHistory {
    pool: SqlitePool,
}

impl SqliteHistory {
    /// Create a new SQLite history store
    ///
    /// # Arguments
    /// * `database_url` - Path to SQLite database file (e.g., "sqlite:///path/to/db.sqlite")
    ///
    /// # Example
    /// ```ignore
    /// let history = SqliteHistory::new("sqlite://moodlog.db").await?;
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Connecting to SQLite database: {}", database_url);

        let mut options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(30));

        // Query logging is too verbose at default levels
        options = options.disable_statement_logging();

        let pool = SqlitePool::connect_with(options).await?;

        info!("SQLite connection established");

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Convert a database row to a PredictionRecord
    fn row_to_record(row: SqliteRow) -> Result<PredictionRecord> {
        let id_str: String = row.try_get("id")?;
        let id = PredictionId::from_string(&id_str)?;

        let sentiment_str: String = row.try_get("sentiment")?;
        let sentiment = Sentiment::from_str(&sentiment_str)?;

        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(PredictionRecord {
            id,
            text: row.try_get("text")?,
            sentiment,
            created_at,
        })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    async fn record(&self, record: &PredictionRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO predictions (id, text, sentiment, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.text)
        .bind(record.sentiment.as_str())
        // Fixed-width RFC 3339 so lexicographic order equals time order
        .bind(record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PredictionRecord>> {
        let rows = sqlx::query(
            "SELECT id, text, sentiment, created_at FROM predictions ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM predictions")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n as usize)
    }
}
