//! Scriptable model fakes for tests.
//!
//! [`MockEmbedder`] gives every distinct word its own axis, so cosine similarities are
//! exact functions of word overlap (no hash collisions). Synonyms map one word onto
//! another's axis, which lets tests build "semantically close but never mentioned"
//! cases. Calls are counted and individual texts can be made to fail.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::constants::DEFAULT_EMBEDDING_DIM;
use crate::embedding::sentence::l2_normalize;
use crate::embedding::{
    EmbeddingError, Sentiment, SentimentAnalyzer, SentimentError, SentimentLabel, TextEmbedder,
};
use crate::hashing::tokenize_words;

#[derive(Debug)]
pub struct MockEmbedder {
    dim: usize,
    axes: Mutex<HashMap<String, usize>>,
    synonyms: HashMap<String, String>,
    calls: AtomicUsize,
    call_log: Mutex<Vec<String>>,
    fail_on: Mutex<HashSet<String>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::with_dim(DEFAULT_EMBEDDING_DIM)
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            axes: Mutex::new(HashMap::new()),
            synonyms: HashMap::new(),
            calls: AtomicUsize::new(0),
            call_log: Mutex::new(Vec::new()),
            fail_on: Mutex::new(HashSet::new()),
        }
    }

    /// Embeds `word` on the same axis as `target`.
    pub fn with_synonym(mut self, word: &str, target: &str) -> Self {
        self.synonyms
            .insert(word.to_lowercase(), target.to_lowercase());
        self
    }

    /// Makes `embed` fail for this exact text (compared trimmed, case-insensitive).
    pub fn fail_on(&self, text: &str) {
        self.fail_on.lock().insert(text.trim().to_lowercase());
    }

    /// Undoes [`fail_on`](Self::fail_on).
    pub fn allow(&self, text: &str) {
        self.fail_on.lock().remove(&text.trim().to_lowercase());
    }

    /// Total `embed` calls, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `embed` calls made with exactly `text`.
    pub fn calls_for(&self, text: &str) -> usize {
        self.call_log.lock().iter().filter(|t| *t == text).count()
    }

    fn axis_for(&self, word: &str) -> usize {
        let word = self.synonyms.get(word).map(String::as_str).unwrap_or(word);
        let mut axes = self.axes.lock();
        let next = axes.len();
        *axes.entry(word.to_string()).or_insert(next) % self.dim.max(1)
    }
}

impl TextEmbedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_log.lock().push(text.to_string());

        if self.fail_on.lock().contains(&text.trim().to_lowercase()) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("mock failure for '{}'", text),
            });
        }

        let mut embedding = vec![0.0f32; self.dim];
        for word in tokenize_words(text) {
            embedding[self.axis_for(&word)] += 1.0;
        }
        Ok(l2_normalize(embedding))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}

/// Returns a fixed sentiment, or fails every call.
#[derive(Debug)]
pub struct MockSentimentAnalyzer {
    result: Option<Sentiment>,
    calls: AtomicUsize,
}

impl MockSentimentAnalyzer {
    pub fn new(sentiment: Sentiment) -> Self {
        Self {
            result: Some(sentiment),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn positive(score: f32) -> Self {
        Self::new(Sentiment::new(SentimentLabel::Positive, score))
    }

    pub fn negative(score: f32) -> Self {
        Self::new(Sentiment::new(SentimentLabel::Negative, score))
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentAnalyzer for MockSentimentAnalyzer {
    fn analyze(&self, _text: &str) -> Result<Sentiment, SentimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.ok_or_else(|| SentimentError::InferenceFailed {
            reason: "mock sentiment failure".to_string(),
        })
    }

    fn is_stub(&self) -> bool {
        true
    }
}
