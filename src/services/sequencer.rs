//! Agent execution sequencer.
//!
//! Runs an ordered specialist sequence strictly sequentially, folding each
//! specialist's state updates into the shared context so later specialists
//! in the same run observe them. The first `needs_clarification` output
//! halts the chain and synthesizes `pending` outputs for everything left;
//! a specialist error is isolated into a per-step error output and the
//! chain continues.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::models::{AgentName, AgentOutput, AgentStatus, EnrichedContext};
use crate::domain::ports::{KnowledgeRetriever, Specialist};

/// Explicit, immutable capability map from roster identity to
/// implementation. Constructed once and injected into the sequencer —
/// substituting test doubles is a constructor argument away.
pub struct SpecialistRegistry {
    specialists: HashMap<AgentName, Arc<dyn Specialist>>,
}

impl SpecialistRegistry {
    /// Build a registry from concrete specialists, keyed by their own
    /// reported names.
    pub fn new(specialists: Vec<Arc<dyn Specialist>>) -> Self {
        let specialists = specialists
            .into_iter()
            .map(|specialist| (specialist.name(), specialist))
            .collect();
        Self { specialists }
    }

    pub fn get(&self, name: AgentName) -> Option<&Arc<dyn Specialist>> {
        self.specialists.get(&name)
    }

    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }
}

/// Execute a specialist sequence in order.
///
/// Never fails as a whole: per-step failures become error outputs, and the
/// only thing that stops the chain early is an explicit clarification
/// status. Returns one output per agent in the sequence.
pub async fn execute_sequence(
    registry: &SpecialistRegistry,
    sequence: &[AgentName],
    query: &str,
    context: &mut EnrichedContext,
    retriever: &dyn KnowledgeRetriever,
) -> Vec<AgentOutput> {
    let mut outputs: Vec<AgentOutput> = Vec::with_capacity(sequence.len());

    for (position, &agent) in sequence.iter().enumerate() {
        let Some(specialist) = registry.get(agent) else {
            warn!(%agent, "no implementation registered, synthesizing error output");
            outputs.push(AgentOutput::error(
                agent,
                format!("Agent '{agent}' not found"),
            ));
            continue;
        };

        let output = match specialist.run(query, context, retriever).await {
            Ok(output) => output,
            Err(e) => {
                error!(%agent, error = %e, "specialist failed");
                AgentOutput::error(agent, e.to_string())
            }
        };

        // Carry state updates forward so the next specialist in this run
        // sees them.
        context.apply_state_updates(output.state_updates);

        let halted = output.status == AgentStatus::NeedsClarification;
        outputs.push(output);

        if halted {
            info!(%agent, "clarification requested, halting sequence");
            for &remaining in &sequence[position + 1..] {
                outputs.push(AgentOutput::pending(remaining));
            }
            break;
        }
    }

    outputs
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::models::{
        DecisionState, KnowledgeContext, ProblemState, StateUpdates,
    };
    use crate::domain::ports::NullRetriever;

    /// Scripted stand-in specialist for sequencer tests.
    struct StubSpecialist {
        name: AgentName,
        behavior: Behavior,
    }

    enum Behavior {
        Succeed(StateUpdates),
        Clarify,
        Fail,
        /// Report the problem state it observed at run time.
        ObserveState,
    }

    #[async_trait]
    impl Specialist for StubSpecialist {
        fn name(&self) -> AgentName {
            self.name
        }

        async fn run(
            &self,
            _query: &str,
            context: &EnrichedContext,
            _retriever: &dyn KnowledgeRetriever,
        ) -> DomainResult<AgentOutput> {
            match &self.behavior {
                Behavior::Succeed(updates) => Ok(AgentOutput {
                    agent: self.name,
                    status: AgentStatus::Success,
                    primary_output: json!({"ok": true}),
                    next_recommended_agent: None,
                    state_updates: *updates,
                    confidence: 0.8,
                }),
                Behavior::Clarify => Ok(AgentOutput {
                    agent: self.name,
                    status: AgentStatus::NeedsClarification,
                    primary_output: json!({
                        "clarifying_questions": ["Which market?"],
                        "context_used": ["session state", "prior turns"],
                    }),
                    next_recommended_agent: None,
                    state_updates: StateUpdates::default(),
                    confidence: 0.4,
                }),
                Behavior::Fail => Err(DomainError::ModelCallFailed("boom".to_string())),
                Behavior::ObserveState => Ok(AgentOutput {
                    agent: self.name,
                    status: AgentStatus::Success,
                    primary_output: json!({
                        "observed_problem_state": context.problem_state.as_str(),
                    }),
                    next_recommended_agent: None,
                    state_updates: StateUpdates::default(),
                    confidence: 0.8,
                }),
            }
        }
    }

    fn registry(stubs: Vec<StubSpecialist>) -> SpecialistRegistry {
        SpecialistRegistry::new(
            stubs
                .into_iter()
                .map(|s| Arc::new(s) as Arc<dyn Specialist>)
                .collect(),
        )
    }

    fn context() -> EnrichedContext {
        EnrichedContext {
            query: "q".to_string(),
            session_id: "s1".to_string(),
            problem_state: ProblemState::Undefined,
            decision_state: DecisionState::None,
            topic: "general".to_string(),
            metrics: vec![],
            prior_turns: vec![],
            knowledge: KnowledgeContext::default(),
        }
    }

    #[tokio::test]
    async fn test_state_updates_visible_to_later_specialists() {
        let registry = registry(vec![
            StubSpecialist {
                name: AgentName::Framer,
                behavior: Behavior::Succeed(StateUpdates {
                    problem_state: Some(ProblemState::Framed),
                    decision_state: None,
                }),
            },
            StubSpecialist {
                name: AgentName::Strategist,
                behavior: Behavior::ObserveState,
            },
        ]);

        let mut ctx = context();
        let outputs = execute_sequence(
            &registry,
            &[AgentName::Framer, AgentName::Strategist],
            "q",
            &mut ctx,
            &NullRetriever::new(),
        )
        .await;

        assert_eq!(outputs.len(), 2);
        assert_eq!(
            outputs[1].primary_output["observed_problem_state"],
            "framed"
        );
        assert_eq!(ctx.problem_state, ProblemState::Framed);
    }

    #[tokio::test]
    async fn test_clarification_halts_and_synthesizes_pending() {
        let registry = registry(vec![
            StubSpecialist {
                name: AgentName::Scout,
                behavior: Behavior::Clarify,
            },
            StubSpecialist {
                name: AgentName::Strategist,
                behavior: Behavior::Succeed(StateUpdates::default()),
            },
        ]);

        let mut ctx = context();
        let outputs = execute_sequence(
            &registry,
            &[AgentName::Scout, AgentName::Strategist],
            "q",
            &mut ctx,
            &NullRetriever::new(),
        )
        .await;

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].status, AgentStatus::NeedsClarification);
        assert_eq!(outputs[1].status, AgentStatus::Pending);
        assert_eq!(outputs[1].agent, AgentName::Strategist);
    }

    #[tokio::test]
    async fn test_error_is_isolated_and_chain_continues() {
        // Scenario D: a mid-sequence failure becomes an error output and the
        // next specialist still runs.
        let registry = registry(vec![
            StubSpecialist {
                name: AgentName::Framer,
                behavior: Behavior::Fail,
            },
            StubSpecialist {
                name: AgentName::Strategist,
                behavior: Behavior::Succeed(StateUpdates::default()),
            },
        ]);

        let mut ctx = context();
        let outputs = execute_sequence(
            &registry,
            &[AgentName::Framer, AgentName::Strategist],
            "q",
            &mut ctx,
            &NullRetriever::new(),
        )
        .await;

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].status, AgentStatus::Error);
        assert_eq!(outputs[0].confidence, 0.0);
        assert_eq!(outputs[1].status, AgentStatus::Success);
    }

    #[tokio::test]
    async fn test_missing_agent_becomes_error_output() {
        let registry = registry(vec![StubSpecialist {
            name: AgentName::Framer,
            behavior: Behavior::Succeed(StateUpdates::default()),
        }]);

        let mut ctx = context();
        let outputs = execute_sequence(
            &registry,
            &[AgentName::Narrator, AgentName::Framer],
            "q",
            &mut ctx,
            &NullRetriever::new(),
        )
        .await;

        assert_eq!(outputs[0].status, AgentStatus::Error);
        assert!(outputs[0].primary_output["error"]
            .as_str()
            .unwrap()
            .contains("Narrator"));
        assert_eq!(outputs[1].status, AgentStatus::Success);
    }
}
