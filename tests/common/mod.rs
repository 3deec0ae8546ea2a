//! Shared test harness: in-memory store plus a fully wired router over
//! scripted collaborators.

#![allow(dead_code)]

use std::sync::Arc;

use pmos::domain::models::RuleSet;
use pmos::domain::ports::{KnowledgeRetriever, Retrieval, SessionStore};
use pmos::infrastructure::database::{self, SqliteSessionStore};
use pmos::infrastructure::knowledge::RecordingRetriever;
use pmos::infrastructure::model::MockModelClient;
use pmos::services::specialists::standard_registry;
use pmos::services::{ContextBuilder, IntentClassifier, Router};

/// Create an isolated in-memory session store with the schema applied.
pub async fn setup_store() -> Arc<SqliteSessionStore> {
    let pool = database::create_test_pool()
        .await
        .expect("failed to create test database");
    database::migrations::run_all(&pool)
        .await
        .expect("failed to run migrations");
    Arc::new(SqliteSessionStore::new(pool))
}

/// Everything a pipeline test needs to assert on.
pub struct TestPipeline {
    pub router: Router,
    pub store: Arc<SqliteSessionStore>,
    pub model: Arc<MockModelClient>,
    pub retriever: Arc<RecordingRetriever>,
}

/// Wire a router over a scripted model client.
///
/// The script is consumed FIFO: first the classifier's reply, then one
/// reply per specialist in sequence order.
pub async fn setup_pipeline(responses: Vec<Result<String, String>>) -> TestPipeline {
    let store = setup_store().await;
    let model = Arc::new(MockModelClient::with_responses(responses));
    let retriever = Arc::new(RecordingRetriever::with_result(Retrieval::default()));

    let context_builder = ContextBuilder::new(
        Arc::clone(&store) as Arc<dyn SessionStore>,
        Arc::clone(&retriever) as Arc<dyn KnowledgeRetriever>,
        10,
        3,
    );
    let classifier = IntentClassifier::new(Arc::clone(&model) as _);
    let registry = standard_registry(Arc::clone(&model) as _);

    let router = Router::new(
        Arc::clone(&store) as Arc<dyn SessionStore>,
        context_builder,
        classifier,
        RuleSet::builtin(),
        registry,
        Arc::clone(&retriever) as Arc<dyn KnowledgeRetriever>,
    );

    TestPipeline {
        router,
        store,
        model,
        retriever,
    }
}

/// JSON string for a classifier reply.
pub fn classify_reply(intent: &str, confidence: f64) -> String {
    serde_json::json!({
        "intent": intent,
        "confidence": confidence,
        "reasoning": format!("classified as {intent}"),
    })
    .to_string()
}
