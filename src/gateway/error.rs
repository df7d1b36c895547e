use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::scoring::ScoringError;

use super::status_headers;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("scoring failed: {0}")]
    ScoringFailed(String),
}

impl From<ScoringError> for GatewayError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidInput { reason } => GatewayError::InvalidRequest(reason),
            ScoringError::Embedding(e) => GatewayError::EmbeddingFailed(e.to_string()),
            ScoringError::Dimension(e) => GatewayError::ScoringFailed(e.to_string()),
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, newsrel_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::EmbeddingFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "embedding_error")
            }
            GatewayError::ScoringFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "scoring_error"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, status_headers(newsrel_status), body).into_response()
    }
}
