//! Top-level routing result.

use serde::{Deserialize, Serialize};

use super::agent::{AgentName, AgentOutput};
use super::session::{DecisionState, ProblemState};

/// The surfaced clarification request when a specialist halts the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clarification {
    /// Which specialist is asking.
    pub agent: AgentName,
    pub questions: Vec<String>,
    /// Context sources the specialist already consulted, so the caller can
    /// avoid asking the user for things the system already knows.
    pub context_used: Vec<String>,
    /// Specialists that still need to run once the user answers.
    pub pending_agents: Vec<AgentName>,
}

/// The orchestration result returned by both `route` and `run`.
///
/// `route` leaves `agent_outputs` empty; `run` fills it and, on a
/// clarification halt, sets `needs_clarification` and `clarification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOutcome {
    pub query: String,
    pub intent: Option<AgentName>,
    pub confidence: f64,
    pub reasoning: String,
    pub sequence: Vec<AgentName>,
    pub warning: Option<String>,
    pub rules_applied: Vec<String>,
    pub problem_state: ProblemState,
    pub decision_state: DecisionState,
    pub session_id: String,
    pub needs_clarification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification: Option<Clarification>,
    pub agent_outputs: Vec<AgentOutput>,
}
