/// Model-call port.
///
/// One synchronous "generate text" capability: messages in, text out, or an
/// error. Any multi-provider fallback or retry policy lives inside the
/// adapter and is invisible to the pipeline.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainResult;

/// Message role in a model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// One model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// A single-user-message request, the common case in the pipeline.
    pub fn new(system: Option<String>, user_message: impl Into<String>) -> Self {
        Self {
            system,
            messages: vec![ChatMessage::user(user_message)],
            max_tokens: 2048,
            temperature: 0.3,
        }
    }

    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Port trait for model-call implementations.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` for concurrent use across tokio
/// tasks handling different sessions.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String>;
}
