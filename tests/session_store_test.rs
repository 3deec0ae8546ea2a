//! Integration tests for the SQLite session store.

mod common;

use pmos::domain::models::{AgentName, DecisionState, ProblemState, StateUpdates};
use pmos::domain::ports::SessionStore;

#[tokio::test]
async fn test_create_and_get_session() {
    let store = common::setup_store().await;

    let session = store.create_session().await.unwrap();
    assert!(!session.id.is_empty());
    assert_eq!(session.problem_state, ProblemState::Undefined);
    assert_eq!(session.decision_state, DecisionState::None);

    let fetched = store.get_session(&session.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, session.id);
    assert_eq!(fetched.problem_state, ProblemState::Undefined);
}

#[tokio::test]
async fn test_get_unknown_session_is_none() {
    let store = common::setup_store().await;
    assert!(store.get_session("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_state_patches_only_set_fields() {
    let store = common::setup_store().await;
    let session = store.create_session().await.unwrap();

    store
        .update_state(
            &session.id,
            StateUpdates {
                problem_state: Some(ProblemState::Framed),
                decision_state: None,
            },
        )
        .await
        .unwrap();

    let fetched = store.get_session(&session.id).await.unwrap().unwrap();
    assert_eq!(fetched.problem_state, ProblemState::Framed);
    // the unset field is unchanged
    assert_eq!(fetched.decision_state, DecisionState::None);

    store
        .update_state(
            &session.id,
            StateUpdates {
                problem_state: None,
                decision_state: Some(DecisionState::Decided),
            },
        )
        .await
        .unwrap();

    let fetched = store.get_session(&session.id).await.unwrap().unwrap();
    assert_eq!(fetched.problem_state, ProblemState::Framed);
    assert_eq!(fetched.decision_state, DecisionState::Decided);
}

#[tokio::test]
async fn test_turn_numbers_increase_by_one_from_one() {
    let store = common::setup_store().await;
    let session = store.create_session().await.unwrap();

    for expected in 1..=4 {
        let turn_number = store
            .add_turn(
                &session.id,
                &format!("query {expected}"),
                "Framer",
                &[AgentName::Framer],
            )
            .await
            .unwrap();
        assert_eq!(turn_number, expected);
    }
}

#[tokio::test]
async fn test_turn_counters_are_per_session() {
    let store = common::setup_store().await;
    let first = store.create_session().await.unwrap();
    let second = store.create_session().await.unwrap();

    store
        .add_turn(&first.id, "a", "Framer", &[AgentName::Framer])
        .await
        .unwrap();
    store
        .add_turn(&first.id, "b", "Framer", &[AgentName::Framer])
        .await
        .unwrap();

    let turn = store
        .add_turn(&second.id, "c", "Scout", &[AgentName::Scout])
        .await
        .unwrap();
    assert_eq!(turn, 1);
}

#[tokio::test]
async fn test_recent_turns_oldest_first_with_limit() {
    let store = common::setup_store().await;
    let session = store.create_session().await.unwrap();

    for i in 1..=5 {
        store
            .add_turn(
                &session.id,
                &format!("query {i}"),
                "Executor",
                &[AgentName::Strategist, AgentName::Executor],
            )
            .await
            .unwrap();
    }

    let turns = store.recent_turns(&session.id, 3).await.unwrap();
    assert_eq!(turns.len(), 3);
    // last three turns, oldest first
    assert_eq!(turns[0].turn_number, 3);
    assert_eq!(turns[1].turn_number, 4);
    assert_eq!(turns[2].turn_number, 5);
    assert_eq!(turns[0].query, "query 3");
    assert_eq!(
        turns[0].sequence,
        vec![AgentName::Strategist, AgentName::Executor]
    );
}

#[tokio::test]
async fn test_recent_turns_empty_session() {
    let store = common::setup_store().await;
    let session = store.create_session().await.unwrap();
    assert!(store.recent_turns(&session.id, 10).await.unwrap().is_empty());
}
