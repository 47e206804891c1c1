//! Configuration for the moodlog service
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `MOODLOG_*` environment variables, later sources winning. The
//! database path additionally honors `DATABASE_URL` and a CLI flag via
//! [`resolve_db_path`].

use crate::error::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MoodlogConfig {
    /// SQLite database URL (e.g., "sqlite:///path/to/moodlog.db")
    pub database_url: String,

    /// Address for the HTTP server
    pub bind_addr: String,

    /// Bound on any single history-store operation, in milliseconds.
    /// Past this, the write or read falls back to the in-memory buffer.
    pub write_timeout_ms: u64,

    /// Optional path to a custom lexicon TOML; built-in lexicon when unset
    pub lexicon_path: Option<PathBuf>,
}

impl MoodlogConfig {
    /// Load configuration from defaults, an optional file, and environment
    ///
    /// Environment variables use the `MOODLOG_` prefix, e.g.
    /// `MOODLOG_BIND_ADDR=0.0.0.0:8080`.
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("database_url", default_database_url())?
            .set_default("bind_addr", "127.0.0.1:3000")?
            .set_default("write_timeout_ms", 2000i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(config::File::with_name(path));
        }

        // try_parsing so numeric env values deserialize into u64
        builder = builder.add_source(config::Environment::with_prefix("MOODLOG").try_parsing(true));

        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Store operation timeout as a Duration
    pub fn store_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.write_timeout_ms)
    }
}

/// Get the default database path using the platform data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moodlog")
        .join("moodlog.db")
}

fn default_database_url() -> String {
    format!("sqlite://{}", default_db_path().to_string_lossy())
}

/// Prefix a bare filesystem path with the sqlite scheme
pub fn ensure_sqlite_scheme(path: String) -> String {
    if path.starts_with("sqlite:") {
        path
    } else {
        format!("sqlite://{}", path)
    }
}

/// Resolve the database URL from CLI arg, env vars, or a final default
///
/// Precedence: explicit CLI path, then `MOODLOG_DB_PATH`, then
/// `DATABASE_URL`, then `fallback` (typically the configured URL).
pub fn resolve_db_url(cli_path: Option<String>, fallback: &str) -> String {
    cli_path
        .or_else(|| std::env::var("MOODLOG_DB_PATH").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .map(ensure_sqlite_scheme)
        .unwrap_or_else(|| fallback.to_string())
}

/// Resolve the database URL against the platform default
pub fn resolve_db_path(cli_path: Option<String>) -> String {
    resolve_db_url(cli_path, &default_database_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MoodlogConfig::load(None).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.write_timeout_ms, 2000);
        assert!(config.lexicon_path.is_none());
        assert!(config.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_resolve_db_path_prefers_cli() {
        let url = resolve_db_path(Some("/tmp/custom.db".to_string()));
        assert_eq!(url, "sqlite:///tmp/custom.db");
    }

    #[test]
    fn test_resolve_db_path_keeps_scheme() {
        let url = resolve_db_path(Some("sqlite::memory:".to_string()));
        assert_eq!(url, "sqlite::memory:");
    }
}
