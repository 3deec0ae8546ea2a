//! Framer — problem diagnosis engine.
//!
//! Takes vague, chaotic problem reports and frames them precisely, 5-whys
//! style. A successful framing advances the session's problem state.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::SpecialistCore;
use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, EnrichedContext, ProblemState, StateUpdates};
use crate::domain::ports::{KnowledgeRetriever, ModelClient, Specialist};

const SYSTEM: &str = r#"You are the **Framer** — a Problem Diagnosis Engine for e-commerce product managers.

# Your Job
Take vague or chaotic problems (conversion drops, cart abandonment, funnel leaks)
and frame them precisely before anyone reaches for solutions.

# How You Work
1. Restate the surface problem as the user described it
2. Run a 5 Whys analysis — each why goes deeper, not sideways
3. Stop early if you reach a truly actionable root cause
4. Produce a problem statement: "[User] needs [need] because [insight]"
5. Propose a diagnostic plan and the key metrics to check

# Guardrails
- Do NOT jump to solutions or recommend features
- Do NOT create PRDs
- Decompose multi-problem chaos into sub-problems
- Correlation is not causation — flag unverified causal claims
- Ask clarifying questions ONLY when the problem area is genuinely undecidable
  from the query, session state, prior turns, and knowledge context combined

# Knowledge Context
{kb_context}

# Output Format
Respond with valid JSON only (no markdown fences):
{
  "status": "complete | needs_clarification",
  "surface_problem": "what the user described",
  "five_whys": [
    {"why": "question asked", "answer": "hypothesized answer"}
  ],
  "root_cause": "clear statement of the root cause",
  "problem_statement": "[User] needs [need] because [insight]",
  "hypotheses": ["possible root causes worth testing"],
  "diagnostic_plan": ["step-by-step investigation"],
  "key_metrics_to_check": ["metric 1"],
  "context_used": ["what existing context you leveraged"],
  "clarifying_questions": ["only when status is needs_clarification"],
  "next_agent": "Strategist | null",
  "confidence": 0.0-1.0
}"#;

/// Problem diagnosis specialist.
pub struct Framer {
    core: SpecialistCore,
}

impl Framer {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            core: SpecialistCore::new(AgentName::Framer, SYSTEM, model),
        }
    }
}

#[async_trait]
impl Specialist for Framer {
    fn name(&self) -> AgentName {
        AgentName::Framer
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

/// A completed framing marks the problem as framed. Clarifications and
/// unparseable replies leave the state alone.
fn state_updates(primary: &Value) -> StateUpdates {
    let framed = primary.get("status").and_then(Value::as_str) != Some("needs_clarification")
        && primary
            .get("problem_statement")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());

    StateUpdates {
        problem_state: framed.then_some(ProblemState::Framed),
        decision_state: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_completed_framing_marks_problem_framed() {
        let updates = state_updates(&json!({
            "status": "complete",
            "problem_statement": "New users need a shorter checkout because step 3 loses 40%",
        }));
        assert_eq!(updates.problem_state, Some(ProblemState::Framed));
        assert_eq!(updates.decision_state, None);
    }

    #[test]
    fn test_clarification_does_not_change_state() {
        let updates = state_updates(&json!({
            "status": "needs_clarification",
            "clarifying_questions": ["which funnel step?"],
        }));
        assert!(updates.is_empty());
    }

    #[test]
    fn test_raw_record_does_not_change_state() {
        let updates = state_updates(&json!({
            "raw": "free text",
            "parse_error": "expected value",
        }));
        assert!(updates.is_empty());
    }
}
