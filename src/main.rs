//! Moodlog - Rule-Based Sentiment Classification Service
//!
//! Main entry point: serves the HTTP API, initializes the database, and
//! offers one-off classification and history inspection from the CLI.

use clap::{Parser, Subcommand};
use moodlog::{
    config::{resolve_db_path, resolve_db_url, MoodlogConfig},
    HistoryService, HistoryStore, Lexicon, Result, SentimentClassifier, SqliteHistory,
};
use moodlog::api::{ApiServer, ApiServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moodlog")]
#[command(about = "Rule-based sentiment classification with prediction history")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Database path (overrides MOODLOG_DB_PATH and DATABASE_URL)
    #[arg(long, global = true)]
    db_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and start the HTTP server
    Serve {
        /// Address to bind (e.g., 127.0.0.1:3000)
        #[arg(short, long)]
        addr: Option<String>,

        /// Path to a custom lexicon TOML file
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// Path to a configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Create the database and run migrations
    Init,

    /// Classify one piece of text and print the label (no history write)
    Classify {
        /// Text to classify
        text: String,

        /// Path to a custom lexicon TOML file
        #[arg(short, long)]
        lexicon: Option<PathBuf>,
    },

    /// Print recent predictions, newest first
    History {
        /// Maximum number of records to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Use the requested level for moodlog, keep noisy externals at warn
    let filter = EnvFilter::new(format!(
        "moodlog={},tower_http=warn,sqlx=warn",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("moodlog v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            addr,
            lexicon,
            config,
        } => serve(cli.db_path, addr, lexicon, config).await,
        Commands::Init => init(cli.db_path).await,
        Commands::Classify { text, lexicon } => classify(&text, lexicon),
        Commands::History { limit } => history(cli.db_path, limit).await,
    }
}

/// Open the database, creating parent directories and running migrations
async fn open_store(db_url: &str) -> Result<SqliteHistory> {
    if let Some(path) = db_url.strip_prefix("sqlite://") {
        if let Some(parent) = PathBuf::from(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = SqliteHistory::new(db_url).await?;
    store.run_migrations().await?;
    Ok(store)
}

fn load_classifier(lexicon: Option<PathBuf>) -> Result<SentimentClassifier> {
    match lexicon {
        Some(path) => {
            debug!("Loading lexicon from {}", path.display());
            Ok(SentimentClassifier::new(&Lexicon::from_path(path)?))
        }
        None => Ok(SentimentClassifier::builtin()),
    }
}

async fn serve(
    db_path: Option<String>,
    addr: Option<String>,
    lexicon: Option<PathBuf>,
    config_file: Option<String>,
) -> Result<()> {
    let config = MoodlogConfig::load(config_file.as_deref())?;

    let db_url = resolve_db_url(db_path, &config.database_url);
    let bind_addr = addr.unwrap_or_else(|| config.bind_addr.clone());
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address '{}': {}", bind_addr, e))?;

    let classifier = load_classifier(lexicon.or(config.lexicon_path.clone()))?;
    let store = open_store(&db_url).await?;
    let history = HistoryService::with_timeout(Arc::new(store), config.store_timeout());

    let server = ApiServer::new(
        ApiServerConfig { addr: socket_addr },
        Arc::new(classifier),
        Arc::new(history),
    );
    server.serve().await?;

    Ok(())
}

async fn init(db_path: Option<String>) -> Result<()> {
    let db_url = resolve_db_path(db_path);
    debug!("Initializing database at {}", db_url);

    open_store(&db_url).await?;

    println!("Database initialized: {}", db_url);
    Ok(())
}

fn classify(text: &str, lexicon: Option<PathBuf>) -> Result<()> {
    let classifier = load_classifier(lexicon)?;
    println!("{}", classifier.classify(text));
    Ok(())
}

async fn history(db_path: Option<String>, limit: usize) -> Result<()> {
    let db_url = resolve_db_path(db_path);
    let store = open_store(&db_url).await?;

    let records = store.list_all().await?;
    if records.is_empty() {
        println!("No predictions recorded yet.");
        return Ok(());
    }

    for record in records.iter().take(limit) {
        println!(
            "{}  {:<8}  {}",
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.sentiment,
            record.text
        );
    }
    Ok(())
}
