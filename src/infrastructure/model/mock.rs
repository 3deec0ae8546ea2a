//! Mock model client for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{CompletionRequest, ModelClient};

/// Scripted `ModelClient` for tests.
///
/// Replies are consumed FIFO; once the script runs out, the default
/// response is returned. Every request is recorded for assertions on the
/// prompts the pipeline actually built.
pub struct MockModelClient {
    responses: Mutex<VecDeque<Result<String, String>>>,
    default_response: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            default_response: "{}".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script a FIFO sequence of replies. `Err` entries simulate a
    /// transport failure with the given message.
    pub fn with_responses(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            default_response: "{}".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default_response(default_response: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            default_response: default_response.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Append another scripted reply.
    pub async fn push_response(&self, response: Result<String, String>) {
        self.responses.lock().await.push_back(response);
    }

    /// Every request seen so far, in call order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, request: CompletionRequest) -> DomainResult<String> {
        self.requests.lock().await.push(request);

        let next = self.responses.lock().await.pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(DomainError::ModelCallFailed(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ChatMessage;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest {
            system: None,
            messages: vec![ChatMessage::user(content)],
            max_tokens: 64,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let mock = MockModelClient::with_responses(vec![
            Ok("first".to_string()),
            Err("down".to_string()),
        ]);

        assert_eq!(mock.complete(request("a")).await.unwrap(), "first");
        assert!(mock.complete(request("b")).await.is_err());
        // Script exhausted: default reply.
        assert_eq!(mock.complete(request("c")).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_records_requests() {
        let mock = MockModelClient::new();
        mock.complete(request("what was asked")).await.unwrap();

        let seen = mock.requests().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages[0].content, "what was asked");
    }
}
