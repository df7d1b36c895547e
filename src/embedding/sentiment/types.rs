use serde::{Deserialize, Serialize};

use super::error::SentimentError;

/// Polarity of a document. Serialised lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Maps a classifier's raw label name onto the closed label set.
    ///
    /// Named labels are matched case-insensitively. Generic `LABEL_n` names are
    /// resolved by index: two-way heads follow SST-2 (negative, positive), three-way
    /// heads follow (negative, neutral, positive).
    pub fn from_model_label(
        raw: &str,
        index: usize,
        num_labels: usize,
    ) -> Result<Self, SentimentError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" => return Ok(SentimentLabel::Positive),
            "negative" | "neg" => return Ok(SentimentLabel::Negative),
            "neutral" | "neu" => return Ok(SentimentLabel::Neutral),
            lowered if lowered.starts_with("label_") => {}
            _ => {
                return Err(SentimentError::UnknownLabel {
                    label: raw.to_string(),
                });
            }
        }

        match (num_labels, index) {
            (2, 0) | (3, 0) => Ok(SentimentLabel::Negative),
            (2, 1) | (3, 2) => Ok(SentimentLabel::Positive),
            (3, 1) => Ok(SentimentLabel::Neutral),
            _ => Err(SentimentError::UnknownLabel {
                label: raw.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-level sentiment: a label and the model's confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f32,
}

impl Sentiment {
    pub fn new(label: SentimentLabel, score: f32) -> Self {
        Self { label, score }
    }

    /// The degraded result used when sentiment analysis fails.
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
        }
    }
}
