//! Context builder — enriches a raw query with session state from the
//! store, an inferred topic label, extracted metric mentions, recent
//! turns, and a best-effort knowledge summary.
//!
//! Topic inference and metric extraction are deterministic and synchronous
//! (no model call) so this step stays cheap before any round trip.
//! Retrieval is best-effort: any failure degrades silently to an empty
//! summary — it must never block routing.

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, EnrichedContext, KnowledgeContext};
use crate::domain::ports::{KnowledgeRetriever, SessionStore};

/// Keyword sets scored against the lowercased query. The first label with
/// the highest match count wins; zero matches fall back to "general".
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "conversion",
        &["conversion", "convert", "checkout", "funnel", "drop-off"],
    ),
    (
        "cart_abandonment",
        &["cart abandon", "abandoned cart", "cart drop"],
    ),
    (
        "retention",
        &["retention", "repeat purchase", "churn", "loyalty", "returning"],
    ),
    ("checkout", &["checkout", "payment", "purchase flow"]),
    (
        "search_discovery",
        &["search", "discovery", "finding products", "browse"],
    ),
    (
        "pdp",
        &["product page", "pdp", "product detail", "bounce rate"],
    ),
    (
        "pricing",
        &["price", "pricing", "aov", "discount", "margin", "promo"],
    ),
    (
        "cac",
        &["cac", "acquisition cost", "cost per", "paid", "ad spend"],
    ),
    ("mobile", &["mobile", "app", "responsive", "pwa"]),
    (
        "logistics",
        &["shipping", "delivery", "fulfillment", "returns", "return rate"],
    ),
    (
        "competitive",
        &["competitor", "amazon", "shopify", "asos", "zappos", "walmart", "shein"],
    ),
    (
        "campaign",
        &["black friday", "holiday", "campaign", "sale", "launch"],
    ),
];

/// Enriches queries with session state and knowledge context.
pub struct ContextBuilder {
    store: Arc<dyn SessionStore>,
    retriever: Arc<dyn KnowledgeRetriever>,
    turns_limit: u32,
    broad_results: u32,
    metric_pattern: Regex,
}

impl ContextBuilder {
    pub fn new(
        store: Arc<dyn SessionStore>,
        retriever: Arc<dyn KnowledgeRetriever>,
        turns_limit: u32,
        broad_results: u32,
    ) -> Self {
        // Bare numbers or percentages, with an optional "N to M" range.
        // Permissive by design: no unit normalization happens here.
        let metric_pattern = Regex::new(r"\b(\d+(?:\.\d+)?%?)(?:\s*to\s+(\d+(?:\.\d+)?%?))?")
            .expect("metric pattern is a valid regex");

        Self {
            store,
            retriever,
            turns_limit,
            broad_results,
            metric_pattern,
        }
    }

    /// Build an enriched context for one query.
    ///
    /// Resolves the session create-if-missing: an unknown id yields a
    /// freshly created session, so this call never fails to produce a
    /// usable session. Only store-level failures propagate.
    pub async fn build(&self, query: &str, session_id: &str) -> DomainResult<EnrichedContext> {
        let session = match self.store.get_session(session_id).await? {
            Some(session) => session,
            None => {
                let session = self.store.create_session().await?;
                debug!(requested = session_id, created = %session.id, "session not found, created");
                session
            }
        };

        let prior_turns = self
            .store
            .recent_turns(&session.id, self.turns_limit)
            .await?;

        let topic = infer_topic(query);
        let metrics = self.extract_metrics(query);
        let knowledge = self.retrieve_knowledge(query, &topic).await;

        Ok(EnrichedContext {
            query: query.to_string(),
            session_id: session.id,
            problem_state: session.problem_state,
            decision_state: session.decision_state,
            topic,
            metrics,
            prior_turns,
            knowledge,
        })
    }

    /// Pull numeric mentions out of the query as rough metric strings.
    fn extract_metrics(&self, query: &str) -> Vec<String> {
        let mut values = Vec::new();
        for captures in self.metric_pattern.captures_iter(query) {
            if let Some(first) = captures.get(1) {
                values.push(first.as_str().to_string());
            }
            if let Some(second) = captures.get(2) {
                values.push(second.as_str().to_string());
            }
        }
        values
    }

    /// Broad, agent-agnostic retrieval to enrich the classifier prompt.
    /// Agent-specific retrieval happens later, once intent is classified;
    /// this pass uses the Framer scope as the widest default.
    async fn retrieve_knowledge(&self, query: &str, topic: &str) -> KnowledgeContext {
        match self
            .retriever
            .retrieve(AgentName::Framer, query, topic, self.broad_results)
            .await
        {
            Ok(retrieval) => KnowledgeContext {
                summary: retrieval.summary,
                hits: retrieval.hits,
                structured: retrieval.structured,
            },
            Err(e) => {
                warn!(error = %e, "knowledge retrieval failed, continuing without");
                KnowledgeContext::default()
            }
        }
    }
}

/// Return the best-matching topic label, or "general".
pub fn infer_topic(query: &str) -> String {
    let lowered = query.to_lowercase();
    let mut best = "general";
    let mut best_count = 0;
    for (label, keywords) in TOPIC_KEYWORDS {
        let count = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if count > best_count {
            best_count = count;
            best = label;
        }
    }
    best.to_string()
}
