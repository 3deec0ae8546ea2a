//! Classifier output.

use serde::{Deserialize, Serialize};

use super::agent::AgentName;

/// Result of one intent classification. Ephemeral.
///
/// `intent` is `None` when the query is not a PM task at all (the "None"
/// label); downstream that yields an empty sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent: Option<AgentName>,
    /// Always clamped to [0.0, 1.0].
    pub confidence: f64,
    pub reasoning: String,
}

impl Classification {
    /// The low-confidence default used whenever the model reply is empty,
    /// malformed, or unavailable. The classifier contract is to always
    /// return a usable triple, never to raise.
    pub fn fallback(reasoning: impl Into<String>) -> Self {
        Self {
            intent: Some(AgentName::Framer),
            confidence: 0.3,
            reasoning: reasoning.into(),
        }
    }

    /// The intent label as recorded in the turn log.
    pub fn intent_label(&self) -> &'static str {
        self.intent.map_or("None", AgentName::as_str)
    }
}
