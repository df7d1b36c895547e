//! Candidate relevance scoring.
//!
//! [`RelevanceScorer`] combines two signals per candidate ticker:
//!
//! - semantic: the maximum cosine similarity between the document embedding and the
//!   embeddings of the candidate's aliases (served by
//!   [`AliasEmbeddingCache`](crate::cache::AliasEmbeddingCache));
//! - lexical: whether any alias appears literally in the text.
//!
//! Both must hold for `relevant == true`. Generic financial text is often close to
//! many company names, so similarity alone is not trusted.

pub mod error;
pub mod scorer;
pub mod similarity;
pub mod types;


pub use error::ScoringError;
pub use scorer::{RelevanceScorer, effective_aliases, mentions_any};
pub use similarity::{cosine_similarity, round_score};
pub use types::{Candidate, ScoreResult, ScoringConfig};

pub use crate::embedding::{Sentiment, SentimentLabel};
