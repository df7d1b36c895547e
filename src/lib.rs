//! Newsrel library crate (used by the server binary and integration tests).
//!
//! Scores how relevant a news text is to each of a set of candidate stock tickers and
//! attaches one document-level sentiment judgment.
//!
//! # Public API Surface
//!
//! ## Core
//! - [`RelevanceScorer`] - per-candidate relevance + shared sentiment
//! - [`AliasEmbeddingCache`] - process-wide alias embedding memo
//! - [`Candidate`], [`ScoreResult`], [`ScoringConfig`] - scoring inputs/outputs
//!
//! ## Models
//! - [`TextEmbedder`], [`SentimentAnalyzer`] - capabilities the scorer consumes
//! - [`SentenceEmbedder`], [`SentimentClassifier`] - candle-backed implementations
//!
//! ## Serving
//! - [`Config`] - environment configuration
//! - [`gateway`] - axum router and handlers
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod scoring;

pub use cache::{AliasEmbeddingCache, normalize_alias_key};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{
    EmbedderConfig, EmbeddingError, SentenceEmbedder, Sentiment, SentimentAnalyzer,
    SentimentClassifier, SentimentConfig, SentimentError, SentimentLabel, TextEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{MockEmbedder, MockSentimentAnalyzer};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use scoring::{
    Candidate, RelevanceScorer, ScoreResult, ScoringConfig, ScoringError, cosine_similarity,
    round_score,
};
