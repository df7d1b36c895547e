//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `NEWSREL_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::constants::{DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_SENTIMENT_MAX_CHARS};
use crate::embedding::{EmbedderConfig, SentimentConfig};
use crate::scoring::ScoringConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `NEWSREL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Directory holding the sentence embedding model (`config.json`,
    /// `model.safetensors`, `tokenizer.json`). Unset runs the embedder in stub mode.
    pub embedding_model_path: Option<PathBuf>,

    /// Directory holding the sentiment classifier. Unset runs the analyzer in stub mode.
    pub sentiment_model_path: Option<PathBuf>,

    /// Minimum max-similarity for relevance. Default: `0.4`.
    pub relevance_threshold: f32,

    /// Whether relevance also needs an alias to appear literally in the text. Default: `true`.
    pub require_literal_mention: bool,

    /// Characters of text passed to the sentiment model. Default: `512`.
    pub sentiment_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            embedding_model_path: None,
            sentiment_model_path: None,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            require_literal_mention: true,
            sentiment_max_chars: DEFAULT_SENTIMENT_MAX_CHARS,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "NEWSREL_PORT";
    pub const ENV_BIND_ADDR: &'static str = "NEWSREL_BIND_ADDR";
    pub const ENV_EMBEDDING_MODEL_PATH: &'static str = "NEWSREL_EMBEDDING_MODEL_PATH";
    pub const ENV_SENTIMENT_MODEL_PATH: &'static str = "NEWSREL_SENTIMENT_MODEL_PATH";
    pub const ENV_RELEVANCE_THRESHOLD: &'static str = "NEWSREL_RELEVANCE_THRESHOLD";
    pub const ENV_REQUIRE_LITERAL_MENTION: &'static str = "NEWSREL_REQUIRE_LITERAL_MENTION";
    pub const ENV_SENTIMENT_MAX_CHARS: &'static str = "NEWSREL_SENTIMENT_MAX_CHARS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let embedding_model_path =
            Self::parse_optional_path_from_env(Self::ENV_EMBEDDING_MODEL_PATH);
        let sentiment_model_path =
            Self::parse_optional_path_from_env(Self::ENV_SENTIMENT_MODEL_PATH);
        let relevance_threshold = Self::parse_threshold_from_env(defaults.relevance_threshold)?;
        let require_literal_mention = Self::parse_bool_from_env(
            Self::ENV_REQUIRE_LITERAL_MENTION,
            defaults.require_literal_mention,
        )?;
        let sentiment_max_chars = Self::parse_limit_from_env(
            Self::ENV_SENTIMENT_MAX_CHARS,
            defaults.sentiment_max_chars,
        )?;

        Ok(Self {
            port,
            bind_addr,
            embedding_model_path,
            sentiment_model_path,
            relevance_threshold,
            require_literal_mention,
            sentiment_max_chars,
        })
    }

    /// Validates model paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.embedding_model_path, &self.sentiment_model_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Address the server binds to; IPv6 addresses are bracketed when displayed.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::default()
            .with_threshold(self.relevance_threshold)
            .with_literal_mention(self.require_literal_mention)
    }

    /// Embedder settings; stub mode when no model path is configured.
    pub fn embedder_config(&self) -> EmbedderConfig {
        match &self.embedding_model_path {
            Some(path) => EmbedderConfig::new(path.clone()),
            None => EmbedderConfig::stub(),
        }
    }

    /// Sentiment settings; stub mode when no model path is configured.
    pub fn sentiment_config(&self) -> SentimentConfig {
        let config = match &self.sentiment_model_path {
            Some(path) => SentimentConfig::new(path.clone()),
            None => SentimentConfig::stub(),
        };
        config.with_max_chars(self.sentiment_max_chars)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_RELEVANCE_THRESHOLD) {
            Ok(value) => match value.trim().parse::<f32>() {
                Ok(t) if (-1.0..=1.0).contains(&t) => Ok(t),
                _ => Err(ConfigError::InvalidThreshold { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool { name, value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_limit_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(ConfigError::InvalidLimit { name, value }),
            },
            Err(_) => Ok(default),
        }
    }
}
