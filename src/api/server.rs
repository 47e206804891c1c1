//! HTTP API server
//!
//! Three routes matter: `POST /predict` classifies and records, `GET
//! /history` lists past predictions newest first, `GET /health` reports
//! liveness. The root serves a small embedded demo page. Persistence
//! failures never reach a client; they are absorbed by the
//! `HistoryService` before the handler sees them.

use crate::classifier::SentimentClassifier;
use crate::storage::HistoryService;
use crate::types::PredictionRecord;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Demo page, embedded at compile time
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// Shared handler state
#[derive(Clone)]
struct AppState {
    classifier: Arc<SentimentClassifier>,
    history: Arc<HistoryService>,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    classifier: Arc<SentimentClassifier>,
    history: Arc<HistoryService>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiServerConfig,
        classifier: Arc<SentimentClassifier>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            config,
            classifier,
            history,
        }
    }

    /// Start serving with dynamic port allocation
    ///
    /// Tries the configured address first, then attempts alternative ports
    /// if the primary port is unavailable.
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = build_router(self.classifier, self.history);

        match tokio::net::TcpListener::bind(self.config.addr).await {
            Ok(listener) => {
                info!("moodlog listening on http://{}", self.config.addr);
                axum::serve(listener, router).await?;
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
                debug!(
                    "Port {} in use, trying alternative ports...",
                    self.config.addr.port()
                );
            }
            Err(e) => return Err(e.into()),
        }

        let base_port = self.config.addr.port();
        for offset in 1..=10 {
            let alt_addr = SocketAddr::new(self.config.addr.ip(), base_port + offset);

            match tokio::net::TcpListener::bind(alt_addr).await {
                Ok(listener) => {
                    info!("moodlog listening on http://{}", alt_addr);
                    axum::serve(listener, router).await?;
                    return Ok(());
                }
                Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(anyhow::anyhow!(
            "All ports ({}-{}) are in use",
            base_port,
            base_port + 10
        ))
    }
}

/// Build the application router
///
/// Public so integration tests can drive the routes without binding a
/// socket.
pub fn build_router(
    classifier: Arc<SentimentClassifier>,
    history: Arc<HistoryService>,
) -> Router {
    let state = AppState {
        classifier,
        history,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        .route("/history", get(history_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Client-visible error with a generic message
///
/// Nothing internal leaks: the two variants map to fixed bodies.
#[derive(Debug)]
enum ApiError {
    /// Request payload is missing the text field
    NoText,
    /// Anything else that failed past input validation
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoText => (StatusCode::BAD_REQUEST, "No text provided"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<crate::error::MoodlogError> for ApiError {
    fn from(err: crate::error::MoodlogError) -> Self {
        tracing::error!("Request failed: {}", err);
        ApiError::Internal
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    sentiment: crate::types::Sentiment,
}

/// Classify the request text and append it to history
///
/// The body is accepted as arbitrary JSON so that non-string `text`
/// values can be coerced to their string form instead of rejected; only
/// a missing `text` key is a client error.
async fn predict_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<PredictResponse>, ApiError> {
    let text = match body.get("text") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(ApiError::NoText),
    };

    debug!("Classifying {} bytes of input", text.len());
    let sentiment = state.classifier.classify(&text);
    debug!("Predicted sentiment: {}", sentiment);

    // Best effort: store errors are absorbed inside the service
    state.history.record(&text, sentiment).await;

    Ok(Json(PredictResponse { sentiment }))
}

async fn history_handler(State(state): State<AppState>) -> Json<Vec<PredictionRecord>> {
    Json(state.history.list_all().await)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
