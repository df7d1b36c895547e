use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RELEVANCE_THRESHOLD;
use crate::embedding::SentimentLabel;

/// A ticker to score against a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Ticker symbol, unique within a request.
    pub code: String,
    /// Names used for the ticker in free text. The code itself is always added.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Candidate {
    pub fn new<C, I, A>(code: C, aliases: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            code: code.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn code_only(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            aliases: Vec::new(),
        }
    }
}

/// Per-candidate outcome. The sentiment fields are the document's and repeat across
/// every result of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub code: String,
    /// Best alias similarity, rounded to three decimals.
    pub relevance_score: f32,
    pub relevant: bool,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Minimum unrounded max-similarity for relevance.
    pub relevance_threshold: f32,
    /// When set, some alias must also occur literally in the text.
    pub require_literal_mention: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            require_literal_mention: true,
        }
    }
}

impl ScoringConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn with_literal_mention(mut self, required: bool) -> Self {
        self.require_literal_mention = required;
        self
    }
}
