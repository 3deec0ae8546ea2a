//! Enriched query context.
//!
//! Built fresh for every request by the context builder, mutated in place by
//! the sequencer as specialists emit state updates, never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::session::{DecisionState, ProblemState, Turn};

/// Best-effort knowledge retrieval results attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeContext {
    /// Short LLM-ready summary. Empty when retrieval was unavailable.
    pub summary: String,
    /// Raw retrieval hits, shape owned by the collaborator.
    #[serde(default)]
    pub hits: Vec<Value>,
    /// Structured traversal context, shape owned by the collaborator.
    #[serde(default)]
    pub structured: Value,
}

/// Ephemeral bundle handed to the classifier and the specialists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedContext {
    pub query: String,
    pub session_id: String,
    pub problem_state: ProblemState,
    pub decision_state: DecisionState,
    /// Inferred e-commerce topic label, "general" when nothing matched.
    pub topic: String,
    /// Numeric / percentage mentions pulled from the query text.
    pub metrics: Vec<String>,
    /// Last N turns, oldest first.
    pub prior_turns: Vec<Turn>,
    pub knowledge: KnowledgeContext,
}

impl EnrichedContext {
    /// Apply a specialist's state updates so later specialists in the same
    /// run observe them.
    pub fn apply_state_updates(&mut self, updates: super::agent::StateUpdates) {
        if let Some(problem_state) = updates.problem_state {
            self.problem_state = problem_state;
        }
        if let Some(decision_state) = updates.decision_state {
            self.decision_state = decision_state;
        }
    }
}
