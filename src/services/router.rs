//! Main orchestrator — wires context → classify → enforce → execute.
//!
//! Two modes:
//!   `route()` — classify + enforce only (fast, no specialist model calls)
//!   `run()`   — full pipeline including specialist execution
//!
//! Session state is persisted only for runs that complete without a
//! clarification stop; a halted run is incomplete by definition.

use std::sync::Arc;

use tracing::info;

use super::context_builder::ContextBuilder;
use super::intent_classifier::IntentClassifier;
use super::sequencer::{execute_sequence, SpecialistRegistry};
use super::workflow_enforcer::enforce;
use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AgentStatus, Clarification, EnrichedContext, RouteOutcome, RuleSet, StateUpdates,
};
use crate::domain::ports::{KnowledgeRetriever, SessionStore};

/// The top-level orchestration pipeline.
pub struct Router {
    store: Arc<dyn SessionStore>,
    context_builder: ContextBuilder,
    classifier: IntentClassifier,
    rules: RuleSet,
    registry: SpecialistRegistry,
    retriever: Arc<dyn KnowledgeRetriever>,
}

impl Router {
    pub fn new(
        store: Arc<dyn SessionStore>,
        context_builder: ContextBuilder,
        classifier: IntentClassifier,
        rules: RuleSet,
        registry: SpecialistRegistry,
        retriever: Arc<dyn KnowledgeRetriever>,
    ) -> Self {
        Self {
            store,
            context_builder,
            classifier,
            rules,
            registry,
            retriever,
        }
    }

    /// Route a query through classification + enforcement without running
    /// any specialist. `agent_outputs` stays empty; use [`Router::run`]
    /// for full execution.
    pub async fn route(&self, query: &str, session_id: &str) -> DomainResult<RouteOutcome> {
        let (outcome, _context) = self.route_inner(query, session_id).await?;
        Ok(outcome)
    }

    /// Full pipeline: classify → enforce → execute specialists → update
    /// state. The primary entry point.
    pub async fn run(&self, query: &str, session_id: &str) -> DomainResult<RouteOutcome> {
        let (mut outcome, mut context) = self.route_inner(query, session_id).await?;

        // An empty sequence is the signal to run nothing downstream.
        if outcome.sequence.is_empty() {
            return Ok(outcome);
        }

        let outputs = execute_sequence(
            &self.registry,
            &outcome.sequence,
            query,
            &mut context,
            self.retriever.as_ref(),
        )
        .await;

        // A clarification halt pauses the pipeline: surface the questions,
        // the context already consulted, and what still has to run. Session
        // state stays untouched — the run is incomplete.
        if let Some(clarifying) = outputs
            .iter()
            .find(|o| o.status == AgentStatus::NeedsClarification)
        {
            let pending_agents = outputs
                .iter()
                .filter(|o| o.status == AgentStatus::Pending)
                .map(|o| o.agent)
                .collect();

            outcome.needs_clarification = true;
            outcome.clarification = Some(Clarification {
                agent: clarifying.agent,
                questions: clarifying.clarifying_questions(),
                context_used: clarifying.context_used(),
                pending_agents,
            });
            outcome.agent_outputs = outputs;
            info!(session = %outcome.session_id, "run paused for clarification");
            return Ok(outcome);
        }

        // Merge emitted state updates, last write wins per field, and
        // persist them.
        let mut final_state = StateUpdates::default();
        for output in &outputs {
            final_state.merge(output.state_updates);
        }

        if !final_state.is_empty() {
            self.store
                .update_state(&outcome.session_id, final_state)
                .await?;
            if let Some(problem_state) = final_state.problem_state {
                outcome.problem_state = problem_state;
            }
            if let Some(decision_state) = final_state.decision_state {
                outcome.decision_state = decision_state;
            }
        }

        outcome.agent_outputs = outputs;
        info!(
            session = %outcome.session_id,
            problem_state = %outcome.problem_state,
            decision_state = %outcome.decision_state,
            "run complete"
        );
        Ok(outcome)
    }

    /// Shared front half: enrich, classify, enforce, record the turn.
    async fn route_inner(
        &self,
        query: &str,
        session_id: &str,
    ) -> DomainResult<(RouteOutcome, EnrichedContext)> {
        let context = self.context_builder.build(query, session_id).await?;
        let classification = self.classifier.classify(&context).await;
        let enforcement = enforce(
            &self.rules,
            classification.intent,
            context.problem_state,
            context.decision_state,
        );

        if !enforcement.sequence.is_empty() {
            self.store
                .add_turn(
                    &context.session_id,
                    query,
                    classification.intent_label(),
                    &enforcement.sequence,
                )
                .await?;
        }

        info!(
            session = %context.session_id,
            intent = classification.intent_label(),
            sequence = ?enforcement.sequence,
            "query routed"
        );

        let outcome = RouteOutcome {
            query: query.to_string(),
            intent: classification.intent,
            confidence: classification.confidence,
            reasoning: classification.reasoning,
            sequence: enforcement.sequence,
            warning: enforcement.warning,
            rules_applied: enforcement.rules_applied,
            problem_state: context.problem_state,
            decision_state: context.decision_state,
            session_id: context.session_id.clone(),
            needs_clarification: false,
            clarification: None,
            agent_outputs: Vec::new(),
        };

        Ok((outcome, context))
    }
}
