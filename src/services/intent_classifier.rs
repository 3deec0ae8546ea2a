//! LLM-based intent classifier.
//!
//! One model call maps the enriched context to a specialist name, a
//! confidence, and a rationale. The contract is total: malformed model
//! output, unknown labels, and transport failures all degrade to the
//! default low-confidence Framer triple — this step never raises.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::roster;
use crate::domain::models::{AgentName, Classification, EnrichedContext};
use crate::domain::ports::{CompletionRequest, ModelClient};

const CLASSIFIER_MAX_TOKENS: u32 = 256;
const CLASSIFIER_TEMPERATURE: f32 = 0.0;

/// Classifies queries against the closed specialist roster.
pub struct IntentClassifier {
    model: Arc<dyn ModelClient>,
}

impl IntentClassifier {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Classify one enriched query. Always returns a usable triple.
    pub async fn classify(&self, context: &EnrichedContext) -> Classification {
        let query = context.query.trim();
        if query.is_empty() {
            return Classification::fallback("Empty query — defaulting to Framer for clarification.");
        }

        let prompt = build_prompt(context);
        let request = CompletionRequest::new(None, prompt)
            .with_max_tokens(CLASSIFIER_MAX_TOKENS)
            .with_temperature(CLASSIFIER_TEMPERATURE);

        let raw = match self.model.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "classifier model call failed, using fallback");
                return Classification::fallback(format!("Classifier unavailable: {e}"));
            }
        };

        let classification = parse_reply(&raw);
        debug!(
            intent = classification.intent_label(),
            confidence = classification.confidence,
            "intent classified"
        );
        classification
    }
}

/// Assemble the single classification prompt: roster knowledge, session
/// state, topic, metrics, a compact view of recent turns, and the literal
/// query, followed by the classification policy and the reply contract.
fn build_prompt(context: &EnrichedContext) -> String {
    let mut parts = Vec::new();

    parts.push(
        "You are an intent classifier for an E-commerce PM assistant.\n\n\
         Given a query from a Product Manager, determine which agent they are asking for.\n\n\
         # Agents\n"
            .to_string(),
    );
    parts.push(roster::classifier_block());

    parts.push(format!(
        "# Session\n\
         - Problem state: {}\n\
         - Decision state: {}\n\
         - Topic: {}",
        context.problem_state, context.decision_state, context.topic
    ));

    if !context.metrics.is_empty() {
        parts.push(format!("- Mentioned values: {}", context.metrics.join(", ")));
    }

    if !context.prior_turns.is_empty() {
        let mut lines = vec!["# Recent Turns".to_string()];
        for turn in &context.prior_turns {
            lines.push(format!("- [{}] {}", turn.intent, turn.query));
        }
        parts.push(lines.join("\n"));
    }

    if !context.knowledge.summary.is_empty() {
        parts.push(format!("# Knowledge Context\n{}", context.knowledge.summary));
    }

    parts.push(
        "# Rules\n\
         1. Classify based on what the user is ASKING FOR, not what they SHOULD do.\n\
         2. If they ask \"Ship a feature to fix conversion\" they're asking for Executor, \
         even if they should use Framer first.\n\
         3. If the query mentions a PROBLEM that hasn't been diagnosed (metrics dropping, \
         things broken, \"don't understand why\"), lean toward Framer.\n\
         4. If the query is not related to e-commerce product management at all, respond \
         with intent \"None\".\n\
         5. Empty or meaningless queries should get intent \"Framer\" with low confidence."
            .to_string(),
    );

    parts.push(format!("# Query\n{}", context.query));

    parts.push(
        "Respond ONLY with valid JSON (no markdown fences):\n\
         {\n\
             \"intent\": \"<agent name or None>\",\n\
             \"confidence\": <0.0-1.0>,\n\
             \"reasoning\": \"<brief explanation>\"\n\
         }"
            .to_string(),
    );

    parts.join("\n\n")
}

/// Parse the model's JSON reply, collapsing every malformed shape to the
/// default triple.
fn parse_reply(raw: &str) -> Classification {
    let cleaned = strip_fences(raw);

    let Ok(value) = serde_json::from_str::<Value>(&cleaned) else {
        let head: String = raw.chars().take(120).collect();
        return Classification::fallback(format!("Failed to parse classifier response: {head}"));
    };

    let intent = match value.get("intent").and_then(Value::as_str) {
        Some("None") | Some("none") => None,
        Some(label) => Some(AgentName::from_str(label).unwrap_or(AgentName::Framer)),
        // Missing label collapses to the default, like any unknown label.
        _ => Some(AgentName::Framer),
    };

    let confidence = value
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Classification {
        intent,
        confidence,
        reasoning,
    }
}

/// Strip markdown code fences some models insist on adding.
fn strip_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
