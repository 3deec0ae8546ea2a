//! Domain models for session state and the turn log.
//!
//! A session is the unit of continuity across a user's queries. It carries
//! exactly two small state enumerations — how well the problem is understood
//! and how far a decision has progressed — which gate which specialists may
//! run. Both advance only through specialist state updates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::agent::AgentName;

/// How well the problem under discussion is understood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemState {
    /// No problem has been framed yet.
    #[default]
    Undefined,
    /// A specialist has produced a problem statement.
    Framed,
    /// The framing has been validated against evidence.
    Validated,
}

impl ProblemState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Framed => "framed",
            Self::Validated => "validated",
        }
    }
}

impl fmt::Display for ProblemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProblemState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undefined" => Ok(Self::Undefined),
            "framed" => Ok(Self::Framed),
            "validated" => Ok(Self::Validated),
            other => Err(format!("unknown problem state: {other}")),
        }
    }
}

/// How far the current decision has progressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionState {
    /// No decision is on the table.
    #[default]
    None,
    /// Options exist but nothing has been chosen.
    Open,
    /// A direction has been chosen.
    Decided,
}

impl DecisionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Open => "open",
            Self::Decided => "decided",
        }
    }
}

impl fmt::Display for DecisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "open" => Ok(Self::Open),
            "decided" => Ok(Self::Decided),
            other => Err(format!("unknown decision state: {other}")),
        }
    }
}

/// Durable session record.
///
/// Created on the first unseen id, mutated only by state updates emitted by
/// specialists after a complete (non-clarifying) run, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier, unique within one store instance.
    pub id: String,
    pub problem_state: ProblemState,
    pub decision_state: DecisionState,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session with default state for both enums.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            problem_state: ProblemState::default(),
            decision_state: DecisionState::default(),
            created_at: Utc::now(),
        }
    }
}

/// One recorded routing turn. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub session_id: String,
    /// Monotonic per session, starts at 1.
    pub turn_number: i64,
    pub query: String,
    /// The classified intent label ("None" when nothing matched).
    pub intent: String,
    /// The enforced specialist sequence for this turn.
    pub sequence: Vec<AgentName>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new("abc123");
        assert_eq!(session.id, "abc123");
        assert_eq!(session.problem_state, ProblemState::Undefined);
        assert_eq!(session.decision_state, DecisionState::None);
    }

    #[test]
    fn test_problem_state_round_trip() {
        for state in [
            ProblemState::Undefined,
            ProblemState::Framed,
            ProblemState::Validated,
        ] {
            assert_eq!(state.as_str().parse::<ProblemState>(), Ok(state));
        }
        assert!("bogus".parse::<ProblemState>().is_err());
    }

    #[test]
    fn test_decision_state_round_trip() {
        for state in [
            DecisionState::None,
            DecisionState::Open,
            DecisionState::Decided,
        ] {
            assert_eq!(state.as_str().parse::<DecisionState>(), Ok(state));
        }
        assert!("closed".parse::<DecisionState>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProblemState::Framed).unwrap(),
            "\"framed\""
        );
        assert_eq!(
            serde_json::to_string(&DecisionState::Decided).unwrap(),
            "\"decided\""
        );
    }
}
