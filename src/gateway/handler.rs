use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::embedding::{SentimentAnalyzer, TextEmbedder};

use super::error::GatewayError;
use super::payload::AnalyzeBatchRequest;
use super::state::AppState;
use super::{NEWSREL_STATUS_OK, status_headers};

/// `POST /analyze_batch`.
///
/// Body parsing is done here (not by the extractor's own rejection) so schema errors
/// get the same JSON error body and status header as every other failure.
#[instrument(
    skip(state, body),
    fields(
        request_id = %uuid::Uuid::new_v4(),
        candidates = tracing::field::Empty
    )
)]
pub async fn analyze_batch_handler<E, S>(
    State(state): State<AppState<E, S>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    E: TextEmbedder + 'static,
    S: SentimentAnalyzer + 'static,
{
    let Json(body) = body.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let request: AnalyzeBatchRequest = serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    tracing::Span::current().record("candidates", request.candidates.len());
    debug!(text_len = request.text.len(), "Processing analyze_batch request");

    let results = state
        .scorer
        .score_candidates(&request.text, &request.candidates)
        .await?;

    info!(
        relevant = results.iter().filter(|r| r.relevant).count(),
        total = results.len(),
        "Batch scored"
    );

    Ok((StatusCode::OK, status_headers(NEWSREL_STATUS_OK), Json(results)).into_response())
}
