//! Text generation abstraction.
//!
//! The classifier only needs one capability from a model: turn a prompt
//! into text, or fail with a transport error. That capability is the
//! `TextGenerator` trait; the concrete backend speaks the
//! OpenAI-compatible `/chat/completions` protocol, which covers both a
//! local Ollama server and hosted providers such as OpenRouter.
//!
//! Safety guarantees:
//! - Model output is text only, never executed
//! - API keys are read from the environment at construction, never stored
//!   in configuration files

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Errors from a text generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Capability to turn a prompt into generated text.
///
/// Callers treat any error as "the model is unreachable"; the classifier
/// absorbs it into its fallback path rather than propagating it.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

fn default_base_url() -> String {
    "http://127.0.0.1:11434/v1".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_max_tokens() -> u32 {
    16
}

fn default_timeout_secs() -> u64 {
    30
}

/// Model backend configuration.
///
/// Classification demands determinism, so temperature defaults to 0.0
/// and the token budget is tiny: the model is asked for a single label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible endpoint base, e.g. "http://127.0.0.1:11434/v1".
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name, e.g. "llama3.1:8b" or "meta-llama/llama-3.1-8b-instruct".
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key. None for local servers.
    #[serde(default)]
    pub api_key_env: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub temperature: f32,

    /// Bound on the blocking model call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: None,
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Local server configuration (Ollama-style, no API key).
    pub fn local(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    /// Remote provider configuration with the API key named by env var.
    pub fn remote(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key_env: Some(api_key_env.into()),
            ..Self::default()
        }
    }
}

/// HTTP OpenAI-compatible backend (local or remote).
pub struct HttpOpenAiBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl HttpOpenAiBackend {
    /// Build a backend from config, resolving the API key eagerly so a
    /// missing credential fails at startup instead of per message.
    pub fn new(config: &LlmConfig) -> Result<Self, GenerationError> {
        if config.base_url.trim().is_empty() {
            return Err(GenerationError::Config("base_url is empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(GenerationError::Config("model is empty".to_string()));
        }

        let api_key = match &config.api_key_env {
            Some(var) => match env::var(var) {
                Ok(key) if !key.is_empty() => Some(key),
                _ => {
                    return Err(GenerationError::Config(format!(
                        "API key env var {var} is not set"
                    )));
                }
            },
            None => None,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

impl TextGenerator for HttpOpenAiBackend {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let response = req
            .json(&request_body)
            .send()
            .map_err(|e| GenerationError::Http(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Http(format!("HTTP {status}: {body}")));
        }

        let response_json: serde_json::Value = response
            .json()
            .map_err(|e| GenerationError::Http(format!("failed to parse response: {e}")))?;

        let text = response_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| GenerationError::Unexpected("no content in response".to_string()))?
            .to_string();

        Ok(text)
    }
}
