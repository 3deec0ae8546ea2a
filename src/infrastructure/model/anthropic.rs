//! Anthropic Messages API model client.
//!
//! Implements the `ModelClient` port with direct HTTP calls. Transient
//! transport failures (timeouts, 429, 5xx) are retried with exponential
//! backoff inside the adapter; the pipeline only ever sees "text in, text
//! out, or error".

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::ModelConfig;
use crate::domain::ports::{CompletionRequest, MessageRole, ModelClient};

/// Configuration for the Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (read from `ANTHROPIC_API_KEY` env if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// API version header.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Total retry budget in seconds.
    pub max_retry_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-sonnet-4-5-20250929".to_string(),
            api_version: "2023-06-01".to_string(),
            timeout_secs: 120,
            max_retry_secs: 60,
        }
    }
}

impl AnthropicConfig {
    /// Build from the runtime model configuration.
    pub fn from_model_config(config: &ModelConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            ..Self::default()
        }
    }

    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
    }
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    text: String,
}

/// `ModelClient` implementation over the Anthropic Messages API.
pub struct AnthropicClient {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::ModelCallFailed(e.to_string()))?;
        Ok(Self { config, client })
    }

    async fn send_once(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, backoff::Error<DomainError>> {
        let messages = request
            .messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect();

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system.as_deref(),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.config.api_version)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // Network-level failures are worth retrying.
                backoff::Error::transient(DomainError::ModelCallFailed(e.to_string()))
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            warn!(%status, "transient API failure, will retry");
            return Err(backoff::Error::transient(DomainError::ModelCallFailed(
                format!("API returned {status}"),
            )));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(backoff::Error::permanent(DomainError::ModelCallFailed(
                format!("API returned {status}: {detail}"),
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            backoff::Error::permanent(DomainError::ModelCallFailed(format!(
                "malformed API response: {e}"
            )))
        })?;

        parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| {
                backoff::Error::permanent(DomainError::ModelCallFailed(
                    "empty response content".to_string(),
                ))
            })
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String> {
        let api_key = self.config.get_api_key().ok_or_else(|| {
            DomainError::ModelCallFailed(
                "no API key: set ANTHROPIC_API_KEY or configure model.api_key".to_string(),
            )
        })?;

        let policy = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(self.config.max_retry_secs)),
            ..ExponentialBackoff::default()
        };

        backoff::future::retry(policy, || self.send_once(&api_key, &request)).await
    }
}
