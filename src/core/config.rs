//! Assistant configuration with documented defaults
//!
//! Values come from (lowest to highest precedence) the defaults below,
//! an optional TOML file, `LLM_*` environment variables, and CLI flags.

use crate::core::error::{AssistantError, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub llm: LlmConfig,
}

/// Settings for the inference service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat endpoint. URLs on anthropic.com use the Messages API,
    /// everything else is treated as OpenAI-compatible.
    pub api_url: String,

    /// Model identifier passed through to the API
    pub model: String,

    /// Sampling temperature
    ///
    /// Interpretation should be repeatable, so this stays at 0.0
    /// unless a model misbehaves without some randomness.
    pub temperature: f32,

    /// Upper bound on completion length. A command object is small;
    /// this only needs headroom for models that emit reasoning first.
    pub max_tokens: u32,

    /// Request timeout in seconds. A timeout is reported like any
    /// other failed inference call.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".into(),
            model: "openai/gpt-oss-20b:free".into(),
            temperature: 0.0,
            max_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AssistantError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `LLM_API_URL` / `LLM_MODEL` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LLM_API_URL").filter(|v| !v.trim().is_empty()) {
            self.llm.api_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL").filter(|v| !v.trim().is_empty()) {
            self.llm.model = model;
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let llm = &self.llm;

        if llm.api_url.trim().is_empty() {
            return Err("llm.api_url must not be empty".into());
        }

        if llm.model.trim().is_empty() {
            return Err("llm.model must not be empty".into());
        }

        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(format!(
                "llm.temperature ({}) must be between 0.0 and 2.0",
                llm.temperature
            ));
        }

        if llm.max_tokens == 0 {
            return Err("llm.max_tokens must be positive".into());
        }

        if llm.timeout_secs == 0 {
            return Err("llm.timeout_secs must be positive".into());
        }

        Ok(())
    }
}
