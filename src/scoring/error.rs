use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedding {0}")]
    Dimension(#[from] DimValidationError),
}
