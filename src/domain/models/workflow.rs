//! Declarative workflow rules.
//!
//! A rule pairs a condition over (intent, problem state, decision state)
//! with a prepend/append action on the specialist sequence. Rules are plain
//! data evaluated by a pure function; they can be loaded from a YAML file
//! and are validated at load time so a typo in an agent name fails fast
//! instead of surfacing mid-run.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::agent::AgentName;
use super::session::{DecisionState, ProblemState};
use crate::domain::errors::{DomainError, DomainResult};

/// When a rule fires. All present constraints must match simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_state: Option<ProblemState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_state: Option<DecisionState>,
    /// Exact intent match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<AgentName>,
    /// Intent must be one of the listed specialists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intent_in: Vec<AgentName>,
}

impl RuleCondition {
    /// Check the condition against the current intent and session state.
    pub fn matches(
        &self,
        intent: AgentName,
        problem_state: ProblemState,
        decision_state: DecisionState,
    ) -> bool {
        if let Some(required) = self.problem_state {
            if problem_state != required {
                return false;
            }
        }
        if let Some(required) = self.decision_state {
            if decision_state != required {
                return false;
            }
        }
        if !self.intent_in.is_empty() && !self.intent_in.contains(&intent) {
            return false;
        }
        if let Some(required) = self.intent {
            if intent != required {
                return false;
            }
        }
        true
    }
}

/// What a firing rule does to the sequence. Both insertions are idempotent:
/// an agent already present is left where it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend: Option<AgentName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<AgentName>,
}

impl RuleAction {
    pub const fn is_empty(&self) -> bool {
        self.prepend.is_none() && self.append.is_none()
    }
}

/// One declarative sequencing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub id: String,
    pub name: String,
    pub condition: RuleCondition,
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// The loaded, validated rule table. Static for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<WorkflowRule>,
}

impl RuleSet {
    /// The built-in sequencing rules of the PM workflow.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                WorkflowRule {
                    id: "RULE-01".to_string(),
                    name: "Undefined problem requires Framer".to_string(),
                    condition: RuleCondition {
                        problem_state: Some(ProblemState::Undefined),
                        intent_in: vec![
                            AgentName::Strategist,
                            AgentName::Executor,
                            AgentName::Narrator,
                            AgentName::Aligner,
                        ],
                        ..RuleCondition::default()
                    },
                    action: RuleAction {
                        prepend: Some(AgentName::Framer),
                        append: None,
                    },
                    warning: Some(
                        "Let's first understand the problem before proceeding.".to_string(),
                    ),
                },
                WorkflowRule {
                    id: "RULE-02".to_string(),
                    name: "No decision requires Strategist".to_string(),
                    condition: RuleCondition {
                        decision_state: Some(DecisionState::None),
                        intent_in: vec![AgentName::Executor, AgentName::Narrator],
                        ..RuleCondition::default()
                    },
                    action: RuleAction {
                        prepend: Some(AgentName::Strategist),
                        append: None,
                    },
                    warning: Some(
                        "Let's decide on the approach before proceeding.".to_string(),
                    ),
                },
                WorkflowRule {
                    id: "RULE-03".to_string(),
                    name: "Scout feeds Strategist".to_string(),
                    condition: RuleCondition {
                        intent: Some(AgentName::Scout),
                        ..RuleCondition::default()
                    },
                    action: RuleAction {
                        prepend: None,
                        append: Some(AgentName::Strategist),
                    },
                    warning: None,
                },
                WorkflowRule {
                    id: "RULE-04".to_string(),
                    name: "Aligner needs decision context".to_string(),
                    condition: RuleCondition {
                        decision_state: Some(DecisionState::None),
                        intent: Some(AgentName::Aligner),
                        ..RuleCondition::default()
                    },
                    action: RuleAction {
                        prepend: Some(AgentName::Strategist),
                        append: None,
                    },
                    warning: Some(
                        "Let's clarify the decision before aligning stakeholders.".to_string(),
                    ),
                },
            ],
        }
    }

    /// Parse a rule set from YAML text and validate it.
    pub fn from_yaml_str(yaml: &str) -> DomainResult<Self> {
        let rule_set: Self = serde_yaml::from_str(yaml)
            .map_err(|e| DomainError::InvalidRules(e.to_string()))?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// Load a rule set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DomainError::InvalidRules(format!(
                "cannot read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Fail fast on rule tables that could never behave sensibly.
    pub fn validate(&self) -> DomainResult<()> {
        if self.rules.is_empty() {
            return Err(DomainError::InvalidRules("rule set is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.id.trim().is_empty() {
                return Err(DomainError::InvalidRules(
                    "rule with empty id".to_string(),
                ));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(DomainError::InvalidRules(format!(
                    "duplicate rule id: {}",
                    rule.id
                )));
            }
            if rule.action.is_empty() {
                return Err(DomainError::InvalidRules(format!(
                    "rule {} has no action",
                    rule.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Result of applying the rule table to one classified intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enforcement {
    /// Ordered, deduplicated sequence in canonical order. Empty means
    /// nothing should run.
    pub sequence: Vec<AgentName>,
    /// The first fired rule's warning, or the off-domain warning for a
    /// "None" intent.
    pub warning: Option<String>,
    /// Every fired rule id, for auditability.
    pub rules_applied: Vec<String>,
}
