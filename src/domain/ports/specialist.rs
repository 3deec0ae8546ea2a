/// Specialist port.
///
/// A specialist is a role-bound, model-backed worker: it consumes the
/// query plus enriched context and returns a structured result with an
/// optional state transition. Dispatch over the closed roster happens
/// through this single capability.
use async_trait::async_trait;

use super::retriever::KnowledgeRetriever;
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, EnrichedContext};

/// Port trait for specialist implementations.
///
/// A returned `Err` is isolated by the sequencer into a per-step error
/// output; it never aborts the remainder of the sequence.
#[async_trait]
pub trait Specialist: Send + Sync {
    /// Which roster identity this implementation serves.
    fn name(&self) -> AgentName;

    /// Execute the specialist against one query.
    ///
    /// The specialist may perform its own narrower, role-scoped retrieval
    /// pass through `retriever`; retrieval failures must degrade to an
    /// empty knowledge context, never abort the run.
    async fn run(
        &self,
        query: &str,
        context: &EnrichedContext,
        retriever: &dyn KnowledgeRetriever,
    ) -> DomainResult<AgentOutput>;
}
