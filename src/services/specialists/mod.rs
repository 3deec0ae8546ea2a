//! The six specialist implementations.
//!
//! Every specialist shares one execution core (deep retrieval → prompt
//! assembly → one model call → structured parse → state extraction); each
//! file contributes its system prompt and its state-update extraction.

pub mod aligner;
pub mod executor;
pub mod framer;
pub mod narrator;
pub mod scout;
pub mod strategist;

pub use aligner::Aligner;
pub use executor::Executor;
pub use framer::Framer;
pub use narrator::Narrator;
pub use scout::Scout;
pub use strategist::Strategist;

use std::str::FromStr;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, AgentOutput, AgentStatus, EnrichedContext, StateUpdates};
use crate::domain::ports::{CompletionRequest, KnowledgeRetriever, ModelClient, Specialist};
use crate::services::sequencer::SpecialistRegistry;

/// Build the full production roster over one shared model client.
pub fn standard_registry(model: Arc<dyn ModelClient>) -> SpecialistRegistry {
    SpecialistRegistry::new(vec![
        Arc::new(Framer::new(Arc::clone(&model))) as Arc<dyn Specialist>,
        Arc::new(Scout::new(Arc::clone(&model))),
        Arc::new(Strategist::new(Arc::clone(&model))),
        Arc::new(Aligner::new(Arc::clone(&model))),
        Arc::new(Executor::new(Arc::clone(&model))),
        Arc::new(Narrator::new(model)),
    ])
}

/// How many results each specialist's deep retrieval pass asks for.
/// Deeper than the context builder's broad pass.
const DEEP_RETRIEVAL_RESULTS: u32 = 5;

/// How many prior turns make it into the specialist prompt.
const PROMPT_TURNS: usize = 5;

/// Shared execution engine behind every specialist.
///
/// Holds the specialist's identity, its system prompt template (with a
/// `{kb_context}` placeholder), and its model parameters.
pub(crate) struct SpecialistCore {
    name: AgentName,
    system_template: &'static str,
    max_tokens: u32,
    temperature: f32,
    model: Arc<dyn ModelClient>,
}

impl SpecialistCore {
    pub(crate) fn new(
        name: AgentName,
        system_template: &'static str,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        Self {
            name,
            system_template,
            max_tokens: 2048,
            temperature: 0.3,
            model,
        }
    }

    /// Run the shared pipeline. `extract_state` turns the parsed payload
    /// into this specialist's state transition.
    pub(crate) async fn execute(
        &self,
        query: &str,
        context: &EnrichedContext,
        retriever: &dyn KnowledgeRetriever,
        extract_state: fn(&Value) -> StateUpdates,
    ) -> DomainResult<AgentOutput> {
        // 1. Deep role-scoped retrieval, best-effort.
        let kb_context = match retriever
            .retrieve(self.name, query, &context.topic, DEEP_RETRIEVAL_RESULTS)
            .await
        {
            Ok(retrieval) => retrieval.summary,
            Err(e) => {
                warn!(agent = %self.name, error = %e, "deep retrieval failed, continuing without");
                String::new()
            }
        };

        // 2. Assemble prompts and call the model. A transport failure
        // propagates; the sequencer isolates it into an error output.
        let system = self.system_template.replace(
            "{kb_context}",
            if kb_context.is_empty() {
                "No additional context available."
            } else {
                &kb_context
            },
        );
        let user_message = build_user_message(query, context);
        let request = CompletionRequest::new(Some(system), user_message)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);
        let raw = self.model.complete(request).await?;

        // 3. Parse the structured reply; a malformed one degrades to a
        // raw-text record instead of failing the step.
        let primary_output = match parse_json_reply(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(agent = %self.name, error = %e, "output parse failed");
                json!({ "raw": raw, "parse_error": e.to_string() })
            }
        };

        let status = if primary_output.get("status").and_then(Value::as_str)
            == Some("needs_clarification")
        {
            AgentStatus::NeedsClarification
        } else {
            AgentStatus::Success
        };

        let next_recommended_agent = primary_output
            .get("next_agent")
            .and_then(Value::as_str)
            .and_then(|label| AgentName::from_str(label).ok());

        let confidence = primary_output
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(0.8)
            .clamp(0.0, 1.0);

        let state_updates = extract_state(&primary_output);

        Ok(AgentOutput {
            agent: self.name,
            status,
            primary_output,
            next_recommended_agent,
            state_updates,
            confidence,
        })
    }
}

/// Assemble the user-facing message with session context.
fn build_user_message(query: &str, context: &EnrichedContext) -> String {
    let mut parts = vec![format!("## Query\n{query}")];

    parts.push(format!(
        "## Session State\n\
         - Problem state: {}\n\
         - Decision state: {}\n\
         - Topic: {}",
        context.problem_state, context.decision_state, context.topic
    ));

    if !context.metrics.is_empty() {
        parts.push(format!("- Mentioned values: {}", context.metrics.join(", ")));
    }

    let recent: Vec<_> = context
        .prior_turns
        .iter()
        .rev()
        .take(PROMPT_TURNS)
        .collect();
    if !recent.is_empty() {
        let mut lines = vec!["## Prior Turns".to_string()];
        for turn in recent.into_iter().rev() {
            lines.push(format!("- [{}] {}", turn.intent, turn.query));
        }
        parts.push(lines.join("\n"));
    }

    parts.join("\n\n")
}

/// Extract JSON from a model reply, tolerating markdown fences.
fn parse_json_reply(raw: &str) -> Result<Value, serde_json::Error> {
    let text = raw.trim();
    let cleaned = if text.starts_with("```") {
        text.lines()
            .filter(|line| !line.trim_start().starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        text.to_string()
    };
    serde_json::from_str(&cleaned)
}

/// No state transition, whatever the payload says.
pub(crate) fn no_state_updates(_primary: &Value) -> StateUpdates {
    StateUpdates::default()
}
