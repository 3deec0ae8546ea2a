//! Static knowledge about each specialist.
//!
//! Each roster entry carries the specialist's role, the phrasing users
//! reach for when they want it, its guardrails, and the anti-patterns it
//! must resist. The classifier folds this into its prompt; the specialists
//! use their own system prompts for self-governance.

use crate::domain::models::AgentName;

/// Per-specialist knowledge block.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub name: AgentName,
    pub role: &'static str,
    pub core_job: &'static str,
    /// Phrasing users reach for when they want this specialist.
    pub intent_patterns: &'static [&'static str],
    pub guardrails: &'static [&'static str],
    pub anti_patterns: &'static [&'static str],
}

/// The full roster in canonical order.
pub const ROSTER: [AgentProfile; 6] = [
    AgentProfile {
        name: AgentName::Framer,
        role: "Problem Diagnosis Engine",
        core_job: "Understand and frame ambiguous e-commerce problems before solutions or execution",
        intent_patterns: &[
            "why did X happen",
            "what's going on",
            "help me understand",
            "diagnose",
            "root cause",
            "something is wrong",
            "analyze",
        ],
        guardrails: &[
            "Do NOT jump to solutions",
            "Do NOT create PRDs",
            "Do NOT recommend features prematurely",
            "Always clarify vague inputs",
            "Decompose multi-problem chaos into sub-problems",
        ],
        anti_patterns: &[
            "Execution bait (e.g. 'ship X to fix conversion')",
            "False urgency",
            "Correlation != causation errors",
            "Premature summaries",
        ],
    },
    AgentProfile {
        name: AgentName::Scout,
        role: "Competitive Intelligence Engine",
        core_job: "Track competitors, market moves, and ecosystem trends",
        intent_patterns: &[
            "competitor",
            "Amazon",
            "Shopify",
            "battlecard",
            "market research",
            "what are others doing",
        ],
        guardrails: &[
            "Do NOT recommend copying blindly",
            "Intel should feed strategy",
            "Contextualize for our business model",
        ],
        anti_patterns: &["Feature envy", "Reactive product decisions"],
    },
    AgentProfile {
        name: AgentName::Strategist,
        role: "Decision & Trade-off Engine",
        core_job: "Make structured product and business decisions using frameworks",
        intent_patterns: &[
            "should we",
            "prioritize",
            "decide",
            "which is better",
            "trade-off",
            "rank",
            "evaluate",
        ],
        guardrails: &[
            "Do NOT diagnose undefined problems (route to Framer first)",
            "Avoid opinion-only answers",
            "Quantify trade-offs where possible",
            "Use structured frameworks",
        ],
        anti_patterns: &[
            "Narrative without decision",
            "Execution before prioritization",
            "Copying competitors blindly",
        ],
    },
    AgentProfile {
        name: AgentName::Aligner,
        role: "Stakeholder Alignment Engine",
        core_job: "Manage cross-functional alignment (Marketing, Ops, Finance, Merchandising)",
        intent_patterns: &[
            "convince",
            "buy-in",
            "stakeholder",
            "push back",
            "RACI",
            "handle marketing/finance/ops",
        ],
        guardrails: &[
            "Do NOT align without decision clarity",
            "Avoid people-blaming framing",
            "Surface real constraints vs politics",
        ],
        anti_patterns: &["Aligner abuse (treating strategic issues as people issues)"],
    },
    AgentProfile {
        name: AgentName::Executor,
        role: "Shipping & Delivery Engine",
        core_job: "Convert decisions into executable plans, MVP scope, and launch steps",
        intent_patterns: &[
            "ship",
            "launch",
            "deploy",
            "MVP",
            "rollout",
            "checklist",
            "define scope",
        ],
        guardrails: &[
            "Do NOT define MVP if problem is undefined",
            "Do NOT skip prioritization stage",
            "Flag missing decision context",
        ],
        anti_patterns: &[
            "Shipping as a reaction to metrics",
            "Feature factory behavior",
            "Urgency-driven execution without diagnosis",
        ],
    },
    AgentProfile {
        name: AgentName::Narrator,
        role: "Executive Communication Engine",
        core_job: "Summarize, pitch, and communicate product narratives to leadership",
        intent_patterns: &[
            "summarize",
            "TL;DR",
            "exec update",
            "one-pager",
            "pitch",
            "story",
        ],
        guardrails: &[
            "Do NOT summarize undefined problems",
            "Do NOT create narrative without analysis",
            "Flag missing context",
        ],
        anti_patterns: &["Narrator overreach", "Premature storytelling"],
    },
];

/// Look up the knowledge block for one specialist.
pub fn profile(name: AgentName) -> &'static AgentProfile {
    // ROSTER is in canonical order, so rank doubles as the index.
    &ROSTER[name.canonical_rank()]
}

/// Render the roster as a concise text block for the classifier prompt.
pub fn classifier_block() -> String {
    let mut lines = Vec::new();
    for entry in &ROSTER {
        lines.push(format!("## {} — {}", entry.name, entry.role));
        lines.push(format!("Core job: {}", entry.core_job));
        lines.push(format!(
            "User says things like: {}",
            entry.intent_patterns.join(", ")
        ));
        lines.push(format!("Guardrails: {}", entry.guardrails.join("; ")));
        lines.push(format!(
            "Anti-patterns to watch: {}",
            entry.anti_patterns.join("; ")
        ));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_covers_every_agent_in_order() {
        for agent in AgentName::ALL {
            assert_eq!(profile(agent).name, agent);
        }
    }

    #[test]
    fn test_classifier_block_mentions_every_agent() {
        let block = classifier_block();
        for agent in AgentName::ALL {
            assert!(block.contains(agent.as_str()), "missing {agent}");
        }
    }
}
