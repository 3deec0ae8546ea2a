/// Knowledge-retrieval port.
///
/// An external, best-effort service supplying short grounding text and
/// structured hints. Implementations must tolerate an empty or
/// uninitialized backing index by returning empty results, not an error;
/// the pipeline additionally degrades any error to an empty context, so
/// retrieval can never block routing.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DomainResult;
use crate::domain::models::AgentName;

/// Retrieval results for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
    /// Short LLM-ready summary.
    #[serde(default)]
    pub summary: String,
    /// Raw hits, shape owned by the backing store.
    #[serde(default)]
    pub hits: Vec<Value>,
    /// Structured context (e.g. graph traversal results).
    #[serde(default)]
    pub structured: Value,
}

/// Port trait for knowledge-retrieval implementations.
#[async_trait]
pub trait KnowledgeRetriever: Send + Sync {
    /// Retrieve grounding context scoped to one specialist's role.
    async fn retrieve(
        &self,
        agent: AgentName,
        query: &str,
        topic: &str,
        n_results: u32,
    ) -> DomainResult<Retrieval>;
}
