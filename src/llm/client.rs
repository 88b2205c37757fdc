//! Async HTTP client for the language-understanding service
//!
//! Model-agnostic: supports the Anthropic messages API and OpenAI-compatible
//! chat-completion APIs (format detected from the endpoint URL). Every
//! request carries a hard timeout so a stalled service can never hang a
//! command.

use crate::core::config::BookConfig;
use crate::core::error::{BookError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new client with explicit configuration
    pub fn new(api_key: String, api_url: String, model: String, timeout: Duration) -> Result<Self> {
        let api_format = Self::detect_api_format(&api_url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookError::LlmError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            api_url,
            model,
            api_format,
        })
    }

    /// Create a client from a config handle
    pub fn from_config(config: &BookConfig) -> Result<Self> {
        Self::new(
            config.api_key.clone(),
            config.api_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // OpenAI and compatible APIs (DeepSeek, etc.) share one format
            ApiFormat::OpenAI
        }
    }

    /// Send a completion request to the LLM
    ///
    /// # Arguments
    /// * `system` - System prompt providing context and instructions
    /// * `user` - User message to process
    ///
    /// # Returns
    /// The LLM's text response
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BookError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BookError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| BookError::LlmError(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| BookError::LlmError("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BookError::LlmError(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(BookError::LlmError(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| BookError::LlmError(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| BookError::LlmError("Empty response".into()))
    }
}

// Replies are one small JSON object; no need for a large completion window
const MAX_TOKENS: u32 = 512;

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}
