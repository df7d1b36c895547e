//! HTTP gateway (Axum).
//!
//! Routes:
//!
//! - `POST /analyze_batch`: score candidates for one document.
//! - `GET /healthz`: liveness.
//! - `GET /ready`: readiness plus model modes and alias cache size.
//!
//! Every response carries an [`NEWSREL_STATUS_HEADER`] header.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::{ErrorResponse, GatewayError};
pub use handler::analyze_batch_handler;
pub use payload::AnalyzeBatchRequest;
pub use state::AppState;

use crate::embedding::{SentimentAnalyzer, TextEmbedder};

pub const NEWSREL_STATUS_HEADER: &str = "X-Newsrel-Status";
pub const NEWSREL_STATUS_OK: &str = "ok";
pub const NEWSREL_STATUS_HEALTHY: &str = "healthy";
pub const NEWSREL_STATUS_READY: &str = "ready";

pub fn create_router_with_state<E, S>(state: AppState<E, S>) -> Router
where
    E: TextEmbedder + 'static,
    S: SentimentAnalyzer + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<E, S>))
        .route("/analyze_batch", post(analyze_batch_handler::<E, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
    pub alias_cache_entries: usize,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ComponentStatus {
    pub http: String,
    pub embedder: String,
    pub sentiment: String,
    pub embedder_mode: String,
    pub sentiment_mode: String,
}

pub(crate) fn status_headers(status: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(NEWSREL_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

fn mode(is_stub: bool) -> String {
    let mode = if is_stub { "stub" } else { "real" };
    mode.to_string()
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(NEWSREL_STATUS_HEALTHY),
        Json(HealthResponse {
            status: NEWSREL_STATUS_OK.to_string(),
        }),
    )
        .into_response()
}

/// Models are loaded before the listener binds, so a serving process is ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, S>(State(state): State<AppState<E, S>>) -> Response
where
    E: TextEmbedder + 'static,
    S: SentimentAnalyzer + 'static,
{
    let scorer = &state.scorer;

    let components = ComponentStatus {
        http: NEWSREL_STATUS_READY.to_string(),
        embedder: NEWSREL_STATUS_READY.to_string(),
        sentiment: NEWSREL_STATUS_READY.to_string(),
        embedder_mode: mode(scorer.embedder().is_stub()),
        sentiment_mode: mode(scorer.sentiment_analyzer().is_stub()),
    };

    let alias_cache_entries = scorer.cache().len().await;

    (
        StatusCode::OK,
        status_headers(NEWSREL_STATUS_OK),
        Json(ReadyResponse {
            status: NEWSREL_STATUS_OK.to_string(),
            components,
            alias_cache_entries,
        }),
    )
        .into_response()
}
