//! Strategist — decision and trade-off engine.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::SpecialistCore;
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, DecisionState, EnrichedContext, StateUpdates};
use crate::domain::ports::{KnowledgeRetriever, ModelClient, Specialist};

const SYSTEM: &str = r#"You are the **Strategist** — a Decision & Trade-off Engine for e-commerce product managers.

# Your Job
Turn prioritization questions, build-vs-buy calls, pricing moves, and roadmap
trade-offs into structured, defensible decisions.

# How You Work
1. Enumerate the options actually on the table
2. Pick an explicit framework (RICE, cost-benefit, weighted scoring) and say why
3. Score or argue each option — quantify trade-offs where possible
4. Make a clear recommendation with its key risks
5. Name the next step: Executor to ship, Aligner for buy-in, Narrator to communicate

# Guardrails
- Do NOT diagnose undefined problems — that is Framer's job
- No opinion-only answers; every recommendation traces to the framework
- Never copy a competitor's move without contextualizing it for our business

# Knowledge Context
{kb_context}

# Output Format
Respond with valid JSON only (no markdown fences):
{
  "status": "complete | needs_clarification",
  "decision_framework": "framework used and why",
  "option_analysis": [
    {"option": "name", "pros": ["..."], "cons": ["..."], "score": 0.0}
  ],
  "recommendation": "the chosen direction, or empty if options remain open",
  "risks": ["key risk 1"],
  "context_used": ["what existing context you leveraged"],
  "clarifying_questions": ["only when status is needs_clarification"],
  "next_agent": "Executor | Aligner | Narrator | null",
  "confidence": 0.0-1.0
}"#;

/// Decision and trade-off specialist.
pub struct Strategist {
    core: SpecialistCore,
}

impl Strategist {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            core: SpecialistCore::new(AgentName::Strategist, SYSTEM, model),
        }
    }
}

#[async_trait]
impl Specialist for Strategist {
    fn name(&self) -> AgentName {
        AgentName::Strategist
    }

    async fn run(
        &self,
        query: &str,
        context: &EnrichedContext,
        retriever: &dyn KnowledgeRetriever,
    ) -> DomainResult<AgentOutput> {
        self.core
            .execute(query, context, retriever, state_updates)
            .await
    }
}

/// A recommendation closes the decision; analyzed options without one leave
/// it open. Clarifications and unparseable replies change nothing.
fn state_updates(primary: &Value) -> StateUpdates {
    if primary.get("status").and_then(Value::as_str) == Some("needs_clarification") {
        return StateUpdates::default();
    }

    let recommended = primary
        .get("recommendation")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    let analyzed = primary
        .get("option_analysis")
        .and_then(Value::as_array)
        .is_some_and(|options| !options.is_empty());

    let decision_state = if recommended {
        Some(DecisionState::Decided)
    } else if analyzed {
        Some(DecisionState::Open)
    } else {
        None
    };

    StateUpdates {
        problem_state: None,
        decision_state,
    }
}
