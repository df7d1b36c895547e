use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{AliasEmbeddingCache, normalize_alias_key};
use crate::constants::validate_embedding_dim;
use crate::embedding::{Sentiment, SentimentAnalyzer, TextEmbedder};

use super::error::ScoringError;
use super::similarity::{cosine_similarity, round_score};
use super::types::{Candidate, ScoreResult, ScoringConfig};

/// Scores candidates against a document.
///
/// Relevance needs two signals: the best alias similarity must reach the threshold,
/// and (unless disabled) one of the aliases must occur literally in the text.
/// Sentiment is computed once per document and copied onto every result.
pub struct RelevanceScorer<E: TextEmbedder, S: SentimentAnalyzer> {
    cache: Arc<AliasEmbeddingCache<E>>,
    sentiment: Arc<S>,
    config: ScoringConfig,
}

impl<E: TextEmbedder, S: SentimentAnalyzer> std::fmt::Debug for RelevanceScorer<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer")
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}

impl<E: TextEmbedder, S: SentimentAnalyzer> RelevanceScorer<E, S> {
    pub fn new(cache: Arc<AliasEmbeddingCache<E>>, sentiment: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            cache,
            sentiment,
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<AliasEmbeddingCache<E>> {
        &self.cache
    }

    pub fn embedder(&self) -> &Arc<E> {
        self.cache.embedder()
    }

    pub fn sentiment_analyzer(&self) -> &Arc<S> {
        &self.sentiment
    }

    /// Embeds `text`, classifies its sentiment, then scores every candidate.
    ///
    /// Fails with [`ScoringError::InvalidInput`] for empty or whitespace-only text.
    /// Document and alias embedding failures propagate; sentiment failures do not.
    pub async fn score_candidates(
        &self,
        text: &str,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoreResult>, ScoringError> {
        if text.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "text must not be empty".to_string(),
            });
        }

        let embedder = self.cache.embedder();
        let document_embedding = embedder.embed(text)?;
        validate_embedding_dim(document_embedding.len(), embedder.embedding_dim())?;

        let sentiment = self.analyze_sentiment(text);

        debug!(
            text_len = text.len(),
            candidates = candidates.len(),
            sentiment = %sentiment.label,
            "Scoring document"
        );

        self.score(&document_embedding, &sentiment, candidates, text)
            .await
    }

    /// Scores candidates against an already-embedded document.
    ///
    /// Results come back in candidate order, one per candidate.
    pub async fn score(
        &self,
        document_embedding: &[f32],
        sentiment: &Sentiment,
        candidates: &[Candidate],
        raw_text: &str,
    ) -> Result<Vec<ScoreResult>, ScoringError> {
        let lowered_text = raw_text.to_lowercase();
        let mut results = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let aliases = effective_aliases(candidate);

            let mut max_similarity: Option<f32> = None;
            for alias in &aliases {
                let alias_embedding = self.cache.get_or_compute(alias).await?;
                validate_embedding_dim(alias_embedding.len(), document_embedding.len())?;

                let similarity = cosine_similarity(document_embedding, &alias_embedding);
                max_similarity = Some(max_similarity.map_or(similarity, |m| m.max(similarity)));
            }
            let max_similarity = max_similarity.unwrap_or(0.0);

            let semantic = max_similarity >= self.config.relevance_threshold;
            let literal = mentions_any(&lowered_text, &aliases);
            let relevant = semantic && (literal || !self.config.require_literal_mention);

            debug!(
                code = %candidate.code,
                aliases = aliases.len(),
                max_similarity,
                literal,
                relevant,
                "Scored candidate"
            );

            results.push(ScoreResult {
                code: candidate.code.clone(),
                relevance_score: round_score(max_similarity),
                relevant,
                sentiment_label: sentiment.label,
                sentiment_score: sentiment.score,
            });
        }

        Ok(results)
    }

    /// Classifies `text`, degrading to neutral/0.0 on any failure.
    pub fn analyze_sentiment(&self, text: &str) -> Sentiment {
        match self.sentiment.analyze(text) {
            Ok(sentiment) => sentiment,
            Err(e) => {
                warn!(error = %e, "Sentiment analysis failed, using neutral");
                Sentiment::neutral()
            }
        }
    }
}

/// The aliases a candidate is matched on: its aliases followed by its code.
///
/// Entries are trimmed, blanks are dropped, and later entries equal to an earlier one
/// (ignoring case) are skipped.
pub fn effective_aliases(candidate: &Candidate) -> Vec<String> {
    let mut seen = HashSet::new();
    candidate
        .aliases
        .iter()
        .chain(std::iter::once(&candidate.code))
        .map(|alias| alias.trim())
        .filter(|alias| !alias.is_empty())
        .filter(|alias| seen.insert(normalize_alias_key(alias)))
        .map(str::to_string)
        .collect()
}

/// `true` when any alias occurs in `lowered_text` as a case-insensitive substring.
///
/// `lowered_text` must already be lowercase.
pub fn mentions_any(lowered_text: &str, aliases: &[String]) -> bool {
    aliases.iter().any(|alias| {
        let needle = normalize_alias_key(alias);
        !needle.is_empty() && lowered_text.contains(&needle)
    })
}
