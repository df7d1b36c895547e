use std::path::PathBuf;
use thiserror::Error;

/// Failures of the sentence embedder, from model loading through inference.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("sentence model directory not found: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("could not load sentence model: {reason}")]
    ModelLoadFailed { reason: String },

    /// Raised per text; the alias cache does not store it.
    #[error("could not embed text: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
