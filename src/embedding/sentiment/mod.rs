//! Document sentiment classification.
//!
//! [`SentimentClassifier`] wraps a BERT or DistilBERT sequence classifier (softmax over
//! the head's logits, argmax label, its probability as confidence). Without a model
//! directory it falls back to a market-news word lexicon.
//!
//! Input is cut to [`SentimentConfig::max_chars`] characters before tokenisation and
//! the tokenizer further truncates to [`MAX_SEQ_LEN`] tokens; neither is reported.

pub mod config;
pub mod error;
mod lexicon;
pub mod types;


pub use config::{DEFAULT_MAX_CHARS, MAX_SEQ_LEN, SentimentConfig};
pub use error::SentimentError;
pub use types::{Sentiment, SentimentLabel};

use candle_core::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use crate::embedding::SentimentAnalyzer;
use crate::embedding::bert::BertClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::{
    load_tokenizer_with_truncation, missing_model_files, truncate_chars,
};

use lexicon::lexicon_score;

pub struct SentimentClassifier {
    device: candle_core::Device,
    config: SentimentConfig,
    model: Option<BertClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl SentimentClassifier {
    pub fn load(config: SentimentConfig) -> Result<Self, SentimentError> {
        if let Err(msg) = config.validate() {
            return Err(SentimentError::InvalidConfig { reason: msg });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for sentiment classifier");

        let Some(model_dir) = config.model_dir.clone() else {
            info!("No sentiment model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
                tokenizer: None,
            });
        };

        if !model_dir.is_dir() {
            return Err(SentimentError::ModelNotFound { path: model_dir });
        }

        let missing = missing_model_files(&model_dir);
        if !missing.is_empty() {
            return Err(SentimentError::ModelLoadFailed {
                reason: format!("missing {} in {}", missing.join(", "), model_dir.display()),
            });
        }

        info!(model_dir = %model_dir.display(), "Loading sentiment model");

        let model = BertClassifier::load(&model_dir, &device).map_err(|e| {
            SentimentError::ModelLoadFailed {
                reason: format!("Failed to load sequence classifier: {}", e),
            }
        })?;

        // Resolve every label up front so a bad checkpoint fails at startup.
        let num_labels = model.labels().len();
        for (idx, raw) in model.labels().iter().enumerate() {
            SentimentLabel::from_model_label(raw, idx, num_labels)?;
        }

        let tokenizer = load_tokenizer_with_truncation(&model_dir, MAX_SEQ_LEN).map_err(|e| {
            SentimentError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            architecture = ?model.architecture(),
            labels = ?model.labels(),
            max_chars = config.max_chars,
            "Sentiment model loaded successfully"
        );

        Ok(Self {
            device,
            config,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, SentimentError> {
        Self::load(SentimentConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Softmax over the head's logits, in label order.
    fn label_probabilities(
        &self,
        text: &str,
        model: &BertClassifier,
        tokenizer: &Tokenizer,
    ) -> Result<Vec<f32>, SentimentError> {
        let tokens =
            tokenizer
                .encode(text, true)
                .map_err(|e| SentimentError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, &attention_mask)
            .map_err(|e| SentimentError::InferenceFailed {
                reason: e.to_string(),
            })?;

        Ok(candle_nn::ops::softmax_last_dim(&logits)?
            .flatten_all()?
            .to_vec1::<f32>()?)
    }

    fn classify_with_model(
        &self,
        text: &str,
        model: &BertClassifier,
        tokenizer: &Tokenizer,
    ) -> Result<Sentiment, SentimentError> {
        let probs = self.label_probabilities(text, model, tokenizer)?;

        let (best, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| SentimentError::InferenceFailed {
                reason: "classifier returned no logits".to_string(),
            })?;

        let raw_label = model.labels().get(best).map(String::as_str).unwrap_or("");
        let label = SentimentLabel::from_model_label(raw_label, best, probs.len())?;

        Ok(Sentiment::new(label, confidence))
    }

    fn classify_stub(&self, text: &str) -> Sentiment {
        let score = lexicon_score(text);
        let label = if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Sentiment::new(label, 0.5 + score.abs() / 2.0)
    }
}

impl SentimentAnalyzer for SentimentClassifier {
    fn analyze(&self, text: &str) -> Result<Sentiment, SentimentError> {
        let text = truncate_chars(text, self.config.max_chars);

        debug!(
            text_len = text.len(),
            model_loaded = self.model.is_some(),
            "Classifying sentiment"
        );

        match (&self.model, &self.tokenizer) {
            (Some(model), Some(tokenizer)) => self.classify_with_model(text, model, tokenizer),
            _ => Ok(self.classify_stub(text)),
        }
    }

    fn is_stub(&self) -> bool {
        self.model.is_none()
    }
}
