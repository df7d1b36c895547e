//! Cross-cutting, shared constants.
//!
//! The defaults here describe the stock deployment (MiniLM-L6 embeddings, a BERT-family
//! sentiment head). Anything a deployment may reasonably tune is surfaced again through
//! [`crate::config::Config`].

/// Output dimension of `sentence-transformers/all-MiniLM-L6-v2`.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit used by the sentence embedder (matches the sentence-transformers setting).
pub const DEFAULT_EMBEDDING_MAX_SEQ_LEN: usize = 256;

/// Token limit of the sentiment classifier.
pub const SENTIMENT_MAX_SEQ_LEN: usize = 512;

/// Characters of document text handed to the sentiment classifier.
pub const DEFAULT_SENTIMENT_MAX_CHARS: usize = 512;

/// Minimum max-similarity for a candidate to count as semantically close.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.4;

/// Decimal digits kept in the reported relevance score.
pub const SCORE_DECIMALS: i32 = 3;

/// Error returned when two vectors that must agree on dimension do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use newsrel::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
