//! End-to-end pipeline tests over scripted collaborators.

mod common;

use common::{classify_reply, setup_pipeline};
use pmos::domain::models::{AgentName, AgentStatus, DecisionState, ProblemState};
use pmos::domain::ports::SessionStore;
use serde_json::json;

#[tokio::test]
async fn test_diagnosis_run_frames_the_problem() {
    // Scenario A: fresh session, "conversion dropped 2% this week" →
    // Framer alone → problem_state becomes framed.
    let pipeline = setup_pipeline(vec![
        Ok(classify_reply("Framer", 0.9)),
        Ok(json!({
            "status": "complete",
            "surface_problem": "conversion dropped 2% this week",
            "root_cause": "checkout regression after the payments deploy",
            "problem_statement": "Checkout users need a working wallet flow because the deploy broke it",
            "confidence": 0.85,
        })
        .to_string()),
    ])
    .await;

    let outcome = pipeline
        .router
        .run("conversion dropped 2% this week", "")
        .await
        .unwrap();

    assert_eq!(outcome.intent, Some(AgentName::Framer));
    assert_eq!(outcome.sequence, vec![AgentName::Framer]);
    assert!(outcome.rules_applied.is_empty());
    assert!(!outcome.needs_clarification);
    assert_eq!(outcome.agent_outputs.len(), 1);
    assert_eq!(outcome.agent_outputs[0].status, AgentStatus::Success);
    assert_eq!(outcome.problem_state, ProblemState::Framed);

    // persisted, not just reflected
    let session = pipeline
        .store
        .get_session(&outcome.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.problem_state, ProblemState::Framed);
    assert_eq!(session.decision_state, DecisionState::None);

    // the turn log recorded the routed turn
    let turns = pipeline
        .store
        .recent_turns(&outcome.session_id, 10)
        .await
        .unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].turn_number, 1);
    assert_eq!(turns[0].intent, "Framer");
    assert_eq!(turns[0].sequence, vec![AgentName::Framer]);
}

#[tokio::test]
async fn test_executor_intent_gains_prerequisites_on_route() {
    // Scenario B: undefined/none session, Executor intent → RULE-01 and
    // RULE-02 fire, canonical order, warning from the first fired rule.
    let pipeline = setup_pipeline(vec![Ok(classify_reply("Executor", 0.8))]).await;

    let outcome = pipeline
        .router
        .route("ship the checkout revamp", "")
        .await
        .unwrap();

    assert_eq!(
        outcome.sequence,
        vec![AgentName::Framer, AgentName::Strategist, AgentName::Executor]
    );
    assert_eq!(outcome.rules_applied, vec!["RULE-01", "RULE-02"]);
    assert_eq!(
        outcome.warning.as_deref(),
        Some("Let's first understand the problem before proceeding.")
    );
    // route() never executes specialists
    assert!(outcome.agent_outputs.is_empty());
}

#[tokio::test]
async fn test_scout_intent_appends_strategist() {
    // Scenario C
    let pipeline = setup_pipeline(vec![Ok(classify_reply("Scout", 0.8))]).await;

    let outcome = pipeline
        .router
        .route("what is Amazon doing with one-click checkout", "")
        .await
        .unwrap();

    assert_eq!(
        outcome.sequence,
        vec![AgentName::Scout, AgentName::Strategist]
    );
    assert_eq!(outcome.rules_applied, vec!["RULE-03"]);
}

#[tokio::test]
async fn test_none_intent_runs_nothing_and_records_no_turn() {
    let pipeline = setup_pipeline(vec![Ok(classify_reply("None", 0.95))]).await;

    let outcome = pipeline.router.run("what's the weather", "").await.unwrap();

    assert_eq!(outcome.intent, None);
    assert!(outcome.sequence.is_empty());
    assert!(outcome.warning.is_some());
    assert!(outcome.agent_outputs.is_empty());

    let turns = pipeline
        .store
        .recent_turns(&outcome.session_id, 10)
        .await
        .unwrap();
    assert!(turns.is_empty());
}

#[tokio::test]
async fn test_clarification_halts_and_preserves_state() {
    // Scout asks for clarification; Strategist never runs; session state
    // is untouched.
    let pipeline = setup_pipeline(vec![
        Ok(classify_reply("Scout", 0.8)),
        Ok(json!({
            "status": "needs_clarification",
            "clarifying_questions": ["Which competitor matters most?"],
            "context_used": ["session state", "prior turns"],
            "confidence": 0.4,
        })
        .to_string()),
    ])
    .await;

    let outcome = pipeline
        .router
        .run("how do we stack up against the market", "")
        .await
        .unwrap();

    assert!(outcome.needs_clarification);
    let clarification = outcome.clarification.as_ref().unwrap();
    assert_eq!(clarification.agent, AgentName::Scout);
    assert_eq!(
        clarification.questions,
        vec!["Which competitor matters most?"]
    );
    assert_eq!(
        clarification.context_used,
        vec!["session state", "prior turns"]
    );
    assert_eq!(clarification.pending_agents, vec![AgentName::Strategist]);

    assert_eq!(outcome.agent_outputs.len(), 2);
    assert_eq!(
        outcome.agent_outputs[0].status,
        AgentStatus::NeedsClarification
    );
    assert_eq!(outcome.agent_outputs[1].status, AgentStatus::Pending);

    // halted run: nothing persisted
    let session = pipeline
        .store
        .get_session(&outcome.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.problem_state, ProblemState::Undefined);
    assert_eq!(session.decision_state, DecisionState::None);
}

#[tokio::test]
async fn test_specialist_error_is_isolated_and_later_updates_persist() {
    // Scenario D: Scout's model call dies; the Strategist still runs and
    // its decision persists.
    let pipeline = setup_pipeline(vec![
        Ok(classify_reply("Scout", 0.8)),
        Err("model unreachable".to_string()),
        Ok(json!({
            "status": "complete",
            "decision_framework": "weighted scoring",
            "option_analysis": [{"option": "match them", "score": 2.1}],
            "recommendation": "Hold position, invest in retention instead",
            "confidence": 0.75,
        })
        .to_string()),
    ])
    .await;

    let outcome = pipeline
        .router
        .run("should we react to the competitor launch", "")
        .await
        .unwrap();

    assert_eq!(outcome.agent_outputs.len(), 2);
    assert_eq!(outcome.agent_outputs[0].agent, AgentName::Scout);
    assert_eq!(outcome.agent_outputs[0].status, AgentStatus::Error);
    assert_eq!(outcome.agent_outputs[0].confidence, 0.0);
    assert_eq!(outcome.agent_outputs[1].status, AgentStatus::Success);

    assert!(!outcome.needs_clarification);
    assert_eq!(outcome.decision_state, DecisionState::Decided);

    let session = pipeline
        .store
        .get_session(&outcome.session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.decision_state, DecisionState::Decided);
}

#[tokio::test]
async fn test_unknown_session_id_creates_a_fresh_session() {
    let pipeline = setup_pipeline(vec![Ok(classify_reply("Framer", 0.7))]).await;

    let outcome = pipeline
        .router
        .route("why did retention dip", "never-seen-id")
        .await
        .unwrap();

    // create-if-missing mints a new opaque id rather than failing
    assert_ne!(outcome.session_id, "never-seen-id");
    assert!(pipeline
        .store
        .get_session(&outcome.session_id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_second_turn_sees_advanced_state() {
    // After a framing run, an Executor query no longer triggers RULE-01
    // (the problem is framed) but still triggers RULE-02.
    let pipeline = setup_pipeline(vec![
        Ok(classify_reply("Framer", 0.9)),
        Ok(json!({
            "status": "complete",
            "problem_statement": "Mobile users need a faster PDP because load time doubled",
            "confidence": 0.8,
        })
        .to_string()),
        Ok(classify_reply("Executor", 0.8)),
    ])
    .await;

    let first = pipeline
        .router
        .run("why did mobile conversion fall", "")
        .await
        .unwrap();
    assert_eq!(first.problem_state, ProblemState::Framed);

    let second = pipeline
        .router
        .route("ship the PDP fix", &first.session_id)
        .await
        .unwrap();

    assert_eq!(second.session_id, first.session_id);
    assert_eq!(
        second.sequence,
        vec![AgentName::Strategist, AgentName::Executor]
    );
    assert_eq!(second.rules_applied, vec!["RULE-02"]);

    let turns = pipeline
        .store
        .recent_turns(&first.session_id, 10)
        .await
        .unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].turn_number, 2);
}

#[tokio::test]
async fn test_specialists_perform_deep_retrieval() {
    let pipeline = setup_pipeline(vec![
        Ok(classify_reply("Framer", 0.9)),
        Ok(json!({
            "status": "complete",
            "problem_statement": "p",
            "confidence": 0.8,
        })
        .to_string()),
    ])
    .await;

    pipeline
        .router
        .run("why did conversion drop", "")
        .await
        .unwrap();

    let calls = pipeline.retriever.calls().await;
    // one broad pass from the context builder + one deep pass from Framer
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].n_results, 3);
    assert_eq!(calls[1].n_results, 5);
    assert_eq!(calls[1].agent, AgentName::Framer);
}
