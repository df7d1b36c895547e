//! Model capabilities consumed by the scoring core.
//!
//! The scorer only ever sees the two traits defined here:
//!
//! - [`TextEmbedder`]: text → fixed-length, L2-normalised vector.
//! - [`SentimentAnalyzer`]: text → ([`SentimentLabel`], confidence).
//!
//! [`sentence`] and [`sentiment`] provide candle-backed implementations (each with a
//! model-free stub mode), and [`mock`] provides scriptable fakes for tests.

/// BERT and DistilBERT backbones (encoder + classification head).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Sentence embedder (MiniLM-style mean pooling).
pub mod sentence;
/// Sentiment classifier.
pub mod sentiment;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use sentence::{EmbedderConfig, SENTENCE_EMBEDDING_DIM, SentenceEmbedder};
pub use sentiment::{
    Sentiment, SentimentClassifier, SentimentConfig, SentimentError, SentimentLabel,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEmbedder, MockSentimentAnalyzer};

/// Produces embeddings for arbitrary text.
///
/// Implementations must be deterministic and return L2-normalised vectors of exactly
/// [`embedding_dim`](TextEmbedder::embedding_dim) elements (the zero vector is allowed
/// for text with no tokens).
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn embedding_dim(&self) -> usize;

    /// `true` when no real model backs this embedder.
    fn is_stub(&self) -> bool {
        false
    }
}

/// Classifies the overall tone of a text.
///
/// Implementations only look at a bounded prefix of the input (see
/// [`SentimentConfig::max_chars`]); anything beyond it is ignored without error.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Sentiment, SentimentError>;

    /// `true` when no real model backs this analyzer.
    fn is_stub(&self) -> bool {
        false
    }
}
