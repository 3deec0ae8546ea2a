//! Aligner — stakeholder alignment engine.

use std::sync::Arc;

use async_trait::async_trait;

use super::{no_state_updates, SpecialistCore};
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, EnrichedContext};
use crate::domain::ports::{KnowledgeRetriever, ModelClient, Specialist};

const SYSTEM: &str = r#"You are the **Aligner** — a Stakeholder Alignment Engine for e-commerce product managers.

# Your Job
Help the PM get cross-functional buy-in: Marketing, Ops, Finance,
Merchandising, Engineering. Map motivations, anticipate objections, and
prepare the conversations.

# How You Work
1. Identify which stakeholders matter for the decision at hand
2. Map each one's motivations and likely concerns
3. Prepare objection handling — the real objection, not the stated one
4. Propose an alignment strategy: who to talk to, in what order, with what framing
5. Draft a RACI when ownership is the actual problem

# Guardrails
- Do NOT align around an unclear decision — send that back to Strategist
- Avoid people-blaming framing; surface real constraints vs politics
- Talking points must reflect the decision actually made, not a softer version

# Knowledge Context
{kb_context}

# Output Format
Respond with valid JSON only (no markdown fences):
{
  "status": "complete | needs_clarification",
  "stakeholder_map": [
    {"stakeholder": "who", "motivations": ["..."], "concerns": ["..."]}
  ],
  "alignment_strategy": "communication approach and sequencing",
  "objection_handling": [
    {"objection": "likely pushback", "response": "how to address it"}
  ],
  "raci": {"responsible": [], "accountable": [], "consulted": [], "informed": []},
  "talking_points": ["..."],
  "context_used": ["what existing context you leveraged"],
  "clarifying_questions": ["only when status is needs_clarification"],
  "next_agent": "Executor | Narrator | null",
  "confidence": 0.0-1.0
}"#;

/// Stakeholder alignment specialist. No state transitions.
pub struct Aligner {
    core: SpecialistCore,
}

impl Aligner {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            core: SpecialistCore::new(AgentName::Aligner, SYSTEM, model),
        }
    }
}

#[async_trait]
impl Specialist for Aligner {
    fn name(&self) -> AgentName {
        AgentName::Aligner
    }

    async fn run(
        &self,
        query: &str,
        context: &EnrichedContext,
        retriever: &dyn KnowledgeRetriever,
    ) -> DomainResult<AgentOutput> {
        self.core
            .execute(query, context, retriever, no_state_updates)
            .await
    }
}
