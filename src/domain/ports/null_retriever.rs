//! Null knowledge retriever implementation.
//!
//! Used when no retrieval service is configured but the type system
//! requires a `KnowledgeRetriever` implementation.

use async_trait::async_trait;

use super::retriever::{KnowledgeRetriever, Retrieval};
use crate::domain::errors::DomainResult;
use crate::domain::models::AgentName;

/// A no-op retriever that always returns empty results.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRetriever;

impl NullRetriever {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KnowledgeRetriever for NullRetriever {
    async fn retrieve(
        &self,
        _agent: AgentName,
        _query: &str,
        _topic: &str,
        _n_results: u32,
    ) -> DomainResult<Retrieval> {
        Ok(Retrieval::default())
    }
}
