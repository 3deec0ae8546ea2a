//! HTTP knowledge-retrieval adapter.
//!
//! Talks to an external retrieval service over one POST endpoint. The
//! service contract requires tolerating an empty or uninitialized index by
//! returning empty results; this adapter mirrors that by mapping 404 to an
//! empty retrieval. Transport failures surface as errors — the pipeline
//! degrades them to empty context at the call sites.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AgentName, RetrievalConfig};
use crate::domain::ports::{KnowledgeRetriever, Retrieval};

/// Configuration for the HTTP retriever.
#[derive(Debug, Clone)]
pub struct HttpRetrieverConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl HttpRetrieverConfig {
    /// Build from the runtime retrieval configuration, when a service is
    /// configured at all.
    pub fn from_retrieval_config(config: &RetrievalConfig) -> Option<Self> {
        config.base_url.as_ref().map(|base_url| Self {
            base_url: base_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    agent: &'a str,
    query: &'a str,
    topic: &'a str,
    n_results: u32,
}

/// `KnowledgeRetriever` implementation over an HTTP retrieval service.
pub struct HttpRetriever {
    config: HttpRetrieverConfig,
    client: Client,
}

impl HttpRetriever {
    pub fn new(config: HttpRetrieverConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::RetrievalFailed(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl KnowledgeRetriever for HttpRetriever {
    async fn retrieve(
        &self,
        agent: AgentName,
        query: &str,
        topic: &str,
        n_results: u32,
    ) -> DomainResult<Retrieval> {
        let response = self
            .client
            .post(format!("{}/retrieve", self.config.base_url))
            .json(&RetrieveRequest {
                agent: agent.as_str(),
                query,
                topic,
                n_results,
            })
            .send()
            .await
            .map_err(|e| DomainError::RetrievalFailed(e.to_string()))?;

        // An uninitialized index is not an error: empty results.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Retrieval::default());
        }
        if !response.status().is_success() {
            return Err(DomainError::RetrievalFailed(format!(
                "retrieval service returned {}",
                response.status()
            )));
        }

        response
            .json::<Retrieval>()
            .await
            .map_err(|e| DomainError::RetrievalFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever_for(server_url: &str) -> HttpRetriever {
        HttpRetriever::new(HttpRetrieverConfig {
            base_url: server_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_retrieve_parses_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/retrieve")
            .with_status(200)
            .with_body(r#"{"summary": "checkout benchmarks", "hits": [{"doc": "d1"}]}"#)
            .create_async()
            .await;

        let retrieval = retriever_for(&server.url())
            .retrieve(AgentName::Framer, "conversion drop", "conversion", 3)
            .await
            .unwrap();

        assert_eq!(retrieval.summary, "checkout benchmarks");
        assert_eq!(retrieval.hits.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_index_maps_to_empty_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/retrieve")
            .with_status(404)
            .create_async()
            .await;

        let retrieval = retriever_for(&server.url())
            .retrieve(AgentName::Scout, "q", "general", 3)
            .await
            .unwrap();

        assert_eq!(retrieval, Retrieval::default());
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/retrieve")
            .with_status(500)
            .create_async()
            .await;

        let result = retriever_for(&server.url())
            .retrieve(AgentName::Scout, "q", "general", 3)
            .await;

        assert!(matches!(result, Err(DomainError::RetrievalFailed(_))));
    }
}
