//! Pluggable text-completion providers.
//!
//! Each provider wraps one HTTP completion API behind the
//! [`TextCompletion`] trait: prompt in, plain text out. Callers treat the
//! capability as opaque and unreliable; retries, parsing, and fallback
//! live with the caller.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::llm::{LlmConfig, ProviderKind};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion response had unexpected shape")]
    MalformedResponse,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.3,
        }
    }
}

#[async_trait]
pub trait TextCompletion: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError>;
}

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    const BASE_URL: &'static str = "https://api.anthropic.com/v1/messages";

    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextCompletion for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "max_tokens": options.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let response: Value = self
            .client
            .post(Self::BASE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response["content"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or(ProviderError::MalformedResponse)
    }
}

pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GoogleProvider {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }

    fn url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        )
    }
}

#[async_trait]
impl TextCompletion for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": options.max_tokens,
                "temperature": options.temperature,
            },
        });
        let response: Value = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or(ProviderError::MalformedResponse)
    }
}

pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterProvider {
    const BASE_URL: &'static str = "https://openrouter.ai/api/v1/chat/completions";

    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextCompletion for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        });
        let response: Value = self
            .client
            .post(Self::BASE_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or(ProviderError::MalformedResponse)
    }
}

/// Build the configured provider. The shared client carries the request
/// timeout; the decision layer additionally enforces its own deadline.
pub fn create_provider(config: &LlmConfig) -> Box<dyn TextCompletion> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .unwrap_or_default();
    let api_key = config.api_key.clone();
    let model = config.model.clone();
    match config.kind {
        ProviderKind::Anthropic => Box::new(AnthropicProvider::new(client, api_key, model)),
        ProviderKind::Google => Box::new(GoogleProvider::new(client, api_key, model)),
        ProviderKind::OpenRouter => Box::new(OpenRouterProvider::new(client, api_key, model)),
    }
}
