//! Human and JSON rendering for CLI output.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;

use crate::domain::models::{AgentStatus, RouteOutcome, Session, Turn};

/// Render a routing outcome.
pub fn print_outcome(outcome: &RouteOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("{} {}", style("session:").dim(), outcome.session_id);
    println!(
        "{} {} ({:.2}) — {}",
        style("intent:").dim(),
        outcome.intent.map_or("None", |i| i.as_str()),
        outcome.confidence,
        outcome.reasoning
    );
    println!(
        "{} {} / {}",
        style("state:").dim(),
        outcome.problem_state,
        outcome.decision_state
    );

    let sequence = outcome
        .sequence
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(" → ");
    println!(
        "{} {}",
        style("sequence:").dim(),
        if sequence.is_empty() {
            "(none)"
        } else {
            sequence.as_str()
        }
    );

    if !outcome.rules_applied.is_empty() {
        println!(
            "{} {}",
            style("rules:").dim(),
            outcome.rules_applied.join(", ")
        );
    }
    if let Some(warning) = &outcome.warning {
        println!("{} {warning}", style("warning:").yellow().bold());
    }

    for output in &outcome.agent_outputs {
        let status = match output.status {
            AgentStatus::Success => style("success").green(),
            AgentStatus::NeedsClarification => style("needs clarification").yellow(),
            AgentStatus::Error => style("error").red(),
            AgentStatus::Pending => style("pending").dim(),
        };
        println!("  {} [{status}]", output.agent);
    }

    if let Some(clarification) = &outcome.clarification {
        println!(
            "{} {} is asking:",
            style("paused:").yellow().bold(),
            clarification.agent
        );
        for question in &clarification.questions {
            println!("  - {question}");
        }
        if !clarification.pending_agents.is_empty() {
            let pending = clarification
                .pending_agents
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} {pending}", style("still pending:").dim());
        }
    }

    Ok(())
}

/// Render one session's state.
pub fn print_session(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }

    println!("{} {}", style("session:").dim(), session.id);
    println!("{} {}", style("problem state:").dim(), session.problem_state);
    println!(
        "{} {}",
        style("decision state:").dim(),
        session.decision_state
    );
    println!("{} {}", style("created:").dim(), session.created_at);
    Ok(())
}

/// Render a session's turn log.
pub fn print_turns(turns: &[Turn], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(turns)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Intent", "Sequence", "Query"]);
    for turn in turns {
        let sequence = turn
            .sequence
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        table.add_row(vec![
            turn.turn_number.to_string(),
            turn.intent.clone(),
            sequence,
            turn.query.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
