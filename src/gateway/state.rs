use std::sync::Arc;

use crate::embedding::{SentimentAnalyzer, TextEmbedder};
use crate::scoring::RelevanceScorer;

/// Shared handler state. The scorer (and the alias cache inside it) lives for the
/// whole process.
pub struct AppState<E: TextEmbedder, S: SentimentAnalyzer> {
    pub scorer: Arc<RelevanceScorer<E, S>>,
}

impl<E: TextEmbedder, S: SentimentAnalyzer> AppState<E, S> {
    pub fn new(scorer: Arc<RelevanceScorer<E, S>>) -> Self {
        Self { scorer }
    }
}

impl<E: TextEmbedder, S: SentimentAnalyzer> Clone for AppState<E, S> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}
