//! Async LLM client for command interpretation
//!
//! This is a model-agnostic HTTP client for calling chat APIs.
//! Supports both Anthropic and OpenAI-compatible APIs (OpenRouter, etc).
//! The model only ever turns one utterance into one command object;
//! everything after that is deterministic.

use crate::core::config::LlmConfig;
use crate::core::error::LlmError;
use crate::llm::oracle::Oracle;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: &[&str] = &["LLM_API_KEY", "OPENROUTER_API_KEY"];

/// Longest error body kept in `LlmError::Api`; the rest only goes to the log
const MAX_ERROR_BODY_CHARS: usize = 200;

/// API format type
#[derive(Debug, Clone, PartialEq)]
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
    temperature: f32,
    max_tokens: u32,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_format: Self::detect_api_format(&config.api_url),
        })
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // OpenRouter, OpenAI, DeepSeek and friends all speak the OpenAI format
            ApiFormat::OpenAI
        }
    }

    /// Create a client reading the API key from the environment
    ///
    /// Checks LLM_API_KEY first, then OPENROUTER_API_KEY.
    pub fn from_env(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        Self::new(config, api_key)
    }

    /// Use a specific wire format instead of the one detected from the URL
    ///
    /// Needed for Anthropic-compatible endpoints not hosted on anthropic.com.
    pub fn with_api_format(mut self, api_format: ApiFormat) -> Self {
        self.api_format = api_format;
        self
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
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
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let completion: AnthropicResponse = response.json().await?;

        completion
            .content
            .into_iter()
            .find_map(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
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
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let completion: OpenAIResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Build an API error with the body cut down to a short diagnostic
fn api_error(status: u16, body: &str) -> LlmError {
    tracing::warn!(status, %body, "Inference API returned an error");

    let body = body.trim();
    let mut short: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if short.len() < body.len() {
        short.push('…');
    }
    LlmError::Api {
        status,
        body: short,
    }
}

#[async_trait]
impl Oracle for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        tracing::debug!(
            model = %self.model,
            format = ?self.api_format,
            system_len = system.len(),
            user_len = user.len(),
            "Sending completion request"
        );

        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

// OpenAI-compatible API format (OpenRouter, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
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
    // Some providers send null content when the completion was filtered
    #[serde(default)]
    content: Option<String>,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = LlmConfig {
            api_url: "https://api.example.com".into(),
            model: "test-model".into(),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&config, "test-key".into()).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.example.com");
        assert_eq!(client.model(), "test-model");
        assert_eq!(client.api_format(), &ApiFormat::OpenAI);
    }

    #[test]
    fn test_api_error_truncates_long_bodies() {
        let page = format!("<html>{}</html>", "x".repeat(5000));
        let LlmError::Api { status, body } = api_error(502, &page) else {
            panic!("expected Api error");
        };
        assert_eq!(status, 502);
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(body.starts_with("<html>xxx"));
        assert!(body.ends_with('…'));

        let LlmError::Api { body, .. } = api_error(429, " rate limited \n") else {
            panic!("expected Api error");
        };
        assert_eq!(body, "rate limited");
    }

    #[test]
    fn test_detect_api_format() {
        assert_eq!(
            LlmClient::detect_api_format("https://api.anthropic.com/v1/messages"),
            ApiFormat::Anthropic
        );
        assert_eq!(
            LlmClient::detect_api_format("https://openrouter.ai/api/v1/chat/completions"),
            ApiFormat::OpenAI
        );
    }

    #[test]
    fn test_openai_request_shape() {
        let request = OpenAIRequest {
            model: "m".into(),
            max_tokens: 64,
            temperature: 0.0,
            messages: vec![Message {
                role: "user".into(),
                content: "hi".into(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_openai_response_with_null_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: OpenAIResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn test_anthropic_response_skips_non_text_blocks() {
        let json = r#"{"content": [{"type": "thinking"}, {"type": "text", "text": "{}"}]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();
        let text = response.content.into_iter().find_map(|b| b.text);
        assert_eq!(text.as_deref(), Some("{}"));
    }
}
