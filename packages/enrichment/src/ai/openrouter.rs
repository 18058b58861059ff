//! OpenRouter implementation of the [`ChatModel`] trait.
//!
//! One HTTP POST per extraction attempt against the chat-completions
//! endpoint. Transport and status failures come back as classified
//! [`ApiError`]s so the retry wrapper can tell transient from fatal; a
//! 2xx response whose body lacks the expected shape is a data-processing
//! failure and is never retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiErrorKind, EnrichError, Result};
use crate::traits::chat::ChatModel;
use crate::types::config::EnrichmentConfig;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Chat client for the OpenRouter API.
#[derive(Clone)]
pub struct OpenRouterChat {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    base_url: String,
}

impl OpenRouterChat {
    /// Create a new client with the given API key and model parameters.
    pub fn new(api_key: impl Into<String>, config: &EnrichmentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.request_timeout,
            base_url: OPENROUTER_URL.to_string(),
        }
    }

    /// Create from the `OPENROUTER_API_KEY` environment variable.
    pub fn from_env(config: &EnrichmentConfig) -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| EnrichError::Config("OPENROUTER_API_KEY not set".to_string()))?;
        Ok(Self::new(api_key, config))
    }

    /// Set a custom endpoint URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenRouterChat {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&self.base_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ApiError::new(ApiErrorKind::from_transport(&e), e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let kind = ApiErrorKind::from_status(status.as_u16());
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(ApiError::new(
                kind,
                format!("chat completion returned {status}: {preview}"),
            )
            .into());
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            EnrichError::DataProcessing(format!("failed to decode chat response: {e}"))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                EnrichError::DataProcessing(
                    "chat response missing choices[0].message.content".to_string(),
                )
            })
    }
}
