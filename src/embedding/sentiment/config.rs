use std::path::PathBuf;

pub const DEFAULT_MAX_CHARS: usize = crate::constants::DEFAULT_SENTIMENT_MAX_CHARS;

pub const MAX_SEQ_LEN: usize = crate::constants::SENTIMENT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
pub struct SentimentConfig {
    /// Directory with a BERT or DistilBERT sequence-classification checkpoint.
    /// `None` runs the lexicon stub.
    pub model_dir: Option<PathBuf>,

    /// Only this many leading characters of a text are classified.
    pub max_chars: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl SentimentConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_chars == 0 {
            return Err("max_chars must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_dir
            && path.as_os_str().is_empty()
        {
            return Err("model_dir cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
