//! Recording knowledge retriever for testing.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AgentName;
use crate::domain::ports::{KnowledgeRetriever, Retrieval};

/// One observed retrieval call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieverCall {
    pub agent: AgentName,
    pub query: String,
    pub topic: String,
    pub n_results: u32,
}

/// Test retriever that returns a canned result and records every call.
pub struct RecordingRetriever {
    result: Retrieval,
    fail: bool,
    calls: Mutex<Vec<RetrieverCall>>,
}

impl RecordingRetriever {
    /// Always answer with the given retrieval.
    pub fn with_result(result: Retrieval) -> Self {
        Self {
            result,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail, for exercising the degrade-to-empty paths.
    pub fn failing() -> Self {
        Self {
            result: Retrieval::default(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RetrieverCall> {
        self.calls.lock().await.clone()
    }
}

impl Default for RecordingRetriever {
    fn default() -> Self {
        Self::with_result(Retrieval::default())
    }
}

#[async_trait]
impl KnowledgeRetriever for RecordingRetriever {
    async fn retrieve(
        &self,
        agent: AgentName,
        query: &str,
        topic: &str,
        n_results: u32,
    ) -> DomainResult<Retrieval> {
        self.calls.lock().await.push(RetrieverCall {
            agent,
            query: query.to_string(),
            topic: topic.to_string(),
            n_results,
        });

        if self.fail {
            return Err(DomainError::RetrievalFailed("index offline".to_string()));
        }
        Ok(self.result.clone())
    }
}
