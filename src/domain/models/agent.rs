//! The closed specialist roster and per-agent execution output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::session::{DecisionState, ProblemState};

/// The closed set of specialist identities.
///
/// The variant order is the canonical workflow order: diagnosis before
/// intel, intel before strategy, strategy before alignment, alignment
/// before execution, execution before narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentName {
    /// Problem diagnosis engine.
    Framer,
    /// Competitive intelligence engine.
    Scout,
    /// Decision and trade-off engine.
    Strategist,
    /// Stakeholder alignment engine.
    Aligner,
    /// Shipping and delivery engine.
    Executor,
    /// Executive communication engine.
    Narrator,
}

impl AgentName {
    /// All specialists in canonical workflow order.
    pub const ALL: [Self; 6] = [
        Self::Framer,
        Self::Scout,
        Self::Strategist,
        Self::Aligner,
        Self::Executor,
        Self::Narrator,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Framer => "Framer",
            Self::Scout => "Scout",
            Self::Strategist => "Strategist",
            Self::Aligner => "Aligner",
            Self::Executor => "Executor",
            Self::Narrator => "Narrator",
        }
    }

    /// Position in the canonical workflow order.
    pub const fn canonical_rank(self) -> usize {
        match self {
            Self::Framer => 0,
            Self::Scout => 1,
            Self::Strategist => 2,
            Self::Aligner => 3,
            Self::Executor => 4,
            Self::Narrator => 5,
        }
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Framer" => Ok(Self::Framer),
            "Scout" => Ok(Self::Scout),
            "Strategist" => Ok(Self::Strategist),
            "Aligner" => Ok(Self::Aligner),
            "Executor" => Ok(Self::Executor),
            "Narrator" => Ok(Self::Narrator),
            other => Err(format!("unknown agent: {other}")),
        }
    }
}

/// Re-sort a sequence into canonical workflow order.
///
/// Prerequisite insertions may land at either end of the sequence; the final
/// order must be deterministic regardless of insertion order.
pub fn canonical_sort(sequence: &mut [AgentName]) {
    sequence.sort_by_key(|agent| agent.canonical_rank());
}

/// Execution status of one specialist in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The specialist completed its work.
    Success,
    /// The specialist needs more user input before it can proceed.
    /// Halts the remainder of the sequence.
    NeedsClarification,
    /// The specialist failed; the rest of the sequence still runs.
    Error,
    /// The specialist never ran because an earlier one halted the chain.
    Pending,
}

/// Partial patch of the two session state enums.
///
/// Unset fields leave the current value unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_state: Option<ProblemState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_state: Option<DecisionState>,
}

impl StateUpdates {
    pub const fn is_empty(self) -> bool {
        self.problem_state.is_none() && self.decision_state.is_none()
    }

    /// Fold another patch on top of this one, last write wins per field.
    pub fn merge(&mut self, other: Self) {
        if other.problem_state.is_some() {
            self.problem_state = other.problem_state;
        }
        if other.decision_state.is_some() {
            self.decision_state = other.decision_state;
        }
    }
}

/// Structured result of one specialist execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    pub agent: AgentName,
    pub status: AgentStatus,
    /// Opaque structured payload; shape is owned by the specialist.
    pub primary_output: Value,
    pub next_recommended_agent: Option<AgentName>,
    pub state_updates: StateUpdates,
    pub confidence: f64,
}

impl AgentOutput {
    /// Synthesized output for a specialist that failed or is missing from
    /// the registry.
    pub fn error(agent: AgentName, message: impl Into<String>) -> Self {
        Self {
            agent,
            status: AgentStatus::Error,
            primary_output: serde_json::json!({ "error": message.into() }),
            next_recommended_agent: None,
            state_updates: StateUpdates::default(),
            confidence: 0.0,
        }
    }

    /// Synthesized output for a specialist skipped by a clarification halt.
    pub fn pending(agent: AgentName) -> Self {
        Self {
            agent,
            status: AgentStatus::Pending,
            primary_output: Value::Null,
            next_recommended_agent: None,
            state_updates: StateUpdates::default(),
            confidence: 0.0,
        }
    }

    /// The clarifying questions carried in the payload, if any.
    pub fn clarifying_questions(&self) -> Vec<String> {
        string_array(&self.primary_output, "clarifying_questions")
    }

    /// The context sources the specialist already consulted, if reported.
    pub fn context_used(&self) -> Vec<String> {
        string_array(&self.primary_output, "context_used")
    }
}

fn string_array(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
