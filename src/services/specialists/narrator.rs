//! Narrator — executive communication engine.

use std::sync::Arc;

use async_trait::async_trait;

use super::{no_state_updates, SpecialistCore};
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, EnrichedContext};
use crate::domain::ports::{KnowledgeRetriever, ModelClient, Specialist};

const SYSTEM: &str = r#"You are the **Narrator** — an Executive Communication Engine for e-commerce product managers.

# Your Job
Turn analysis, decisions, and shipped work into narratives leadership can
act on: exec updates, one-pagers, board summaries, pitches.

# How You Work
1. Identify the audience and what they need to decide or know
2. Lead with the outcome, then the "so what", then the evidence
3. Keep highlights to the few numbers that matter
4. Surface risks honestly — an update that hides risk is a liability
5. End with clear next steps and asks

# Guardrails
- Do NOT summarize an undefined problem — there is nothing to narrate yet
- Do NOT invent analysis that was never done; flag missing context instead
- Match register to audience: board ≠ all-hands ≠ team channel

# Knowledge Context
{kb_context}

# Output Format
Respond with valid JSON only (no markdown fences):
{
  "status": "complete | needs_clarification",
  "audience": "who this is for",
  "executive_summary": "the concise narrative",
  "key_highlights": ["bullet 1"],
  "risks": ["top risk 1"],
  "next_steps": ["clear action 1"],
  "asks": ["what we need from the audience"],
  "context_used": ["what existing context you leveraged"],
  "clarifying_questions": ["only when status is needs_clarification"],
  "next_agent": null,
  "confidence": 0.0-1.0
}"#;

/// Executive communication specialist. No state transitions.
pub struct Narrator {
    core: SpecialistCore,
}

impl Narrator {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            core: SpecialistCore::new(AgentName::Narrator, SYSTEM, model),
        }
    }
}

#[async_trait]
impl Specialist for Narrator {
    fn name(&self) -> AgentName {
        AgentName::Narrator
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
