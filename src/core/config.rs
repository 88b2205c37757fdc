//! Runtime configuration for the interpreter and its collaborators
//!
//! Everything the orchestrator needs travels in one explicitly constructed
//! handle: API credentials, the confidence threshold, and the database
//! location. There is no process-global state; the handle is built once
//! and passed down. Values come from defaults, then the environment, then
//! an optional TOML file, later sources winning.

use crate::core::error::{BookError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Confidence threshold below which commands are asked to be rephrased
///
/// Below-threshold proposals are more likely misinterpretations than
/// correct-but-uncertain ones, so the default errs toward clarification.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.7;

/// Hard limit for one language-service request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration handle for one interpreter instance
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// API key for the language-understanding service
    ///
    /// May be empty: extraction then fails soft and every natural-language
    /// command gets the clarification reply.
    pub api_key: String,
    /// Endpoint URL; Anthropic and OpenAI-compatible APIs both work
    pub api_url: String,
    /// Model identifier sent with each request
    pub model: String,
    /// Proposals below this confidence are rejected (clamped to [0, 1])
    pub min_confidence: f32,
    /// Timeout for one LLM request, in seconds
    pub request_timeout_secs: u64,
    /// SQLite database location
    pub db_path: PathBuf,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-3-haiku-20240307".into(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            db_path: PathBuf::from("phonebook.db"),
        }
    }
}

/// Overrides as they appear in a TOML config file; every key optional
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    api_url: Option<String>,
    model: Option<String>,
    min_confidence: Option<f32>,
    request_timeout_secs: Option<u64>,
    db_path: Option<PathBuf>,
}

impl BookConfig {
    /// Build a config from environment variables over the defaults
    ///
    /// Recognized: LLM_API_KEY, LLM_API_URL, LLM_MODEL, PHONEBOOK_DB,
    /// PHONEBOOK_MIN_CONFIDENCE.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.api_key = key;
        }
        if let Ok(url) = std::env::var("LLM_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            config.model = model;
        }
        if let Ok(db) = std::env::var("PHONEBOOK_DB") {
            config.db_path = PathBuf::from(db);
        }
        if let Ok(raw) = std::env::var("PHONEBOOK_MIN_CONFIDENCE") {
            if let Ok(value) = raw.parse::<f32>() {
                config.min_confidence = value;
            }
        }
        config.clamped()
    }

    /// Load configuration: defaults, then environment, then the file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_env();

        if let Some(path) = path {
            let content = std::fs::read_to_string(path).map_err(|e| {
                BookError::ConfigError(format!("failed to read {}: {}", path.display(), e))
            })?;
            let file: FileConfig = toml::from_str(&content).map_err(|e| {
                BookError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
            })?;

            if let Some(v) = file.api_key {
                config.api_key = v;
            }
            if let Some(v) = file.api_url {
                config.api_url = v;
            }
            if let Some(v) = file.model {
                config.model = v;
            }
            if let Some(v) = file.min_confidence {
                config.min_confidence = v;
            }
            if let Some(v) = file.request_timeout_secs {
                config.request_timeout_secs = v;
            }
            if let Some(v) = file.db_path {
                config.db_path = v;
            }
        }

        Ok(config.clamped())
    }

    fn clamped(mut self) -> Self {
        self.min_confidence = self.min_confidence.clamp(0.0, 1.0);
        self
    }
}
