//! CLI command implementations.

pub mod init;
pub mod route;
pub mod run;
pub mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::domain::models::{Config, RuleSet};
use crate::domain::ports::{KnowledgeRetriever, NullRetriever, SessionStore};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::database::{self, SqliteSessionStore};
use crate::infrastructure::knowledge::{HttpRetriever, HttpRetrieverConfig};
use crate::infrastructure::model::{AnthropicClient, AnthropicConfig};
use crate::services::specialists::standard_registry;
use crate::services::{ContextBuilder, IntentClassifier, Router};

/// Load config and open the database, applying migrations.
pub(crate) async fn open_database(config: &Config) -> Result<SqlitePool> {
    let url = format!("sqlite:{}", config.database.path);
    let pool = database::create_pool(
        &url,
        Some(database::PoolConfig {
            max_connections: config.database.max_connections,
            ..database::PoolConfig::default()
        }),
    )
    .await
    .context("failed to open database")?;

    database::migrations::run_all(&pool)
        .await
        .context("failed to run migrations")?;
    Ok(pool)
}

/// Wire the full pipeline from configuration.
pub(crate) async fn build_router(config: &Config) -> Result<Router> {
    let pool = open_database(config).await?;
    let store: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(pool));

    let model = Arc::new(
        AnthropicClient::new(AnthropicConfig::from_model_config(&config.model))
            .context("failed to build model client")?,
    );

    let retriever: Arc<dyn KnowledgeRetriever> =
        match HttpRetrieverConfig::from_retrieval_config(&config.retrieval) {
            Some(retriever_config) => Arc::new(
                HttpRetriever::new(retriever_config)
                    .context("failed to build knowledge retriever")?,
            ),
            None => Arc::new(NullRetriever::new()),
        };

    let rules = match &config.rules_file {
        Some(path) => RuleSet::from_yaml_file(path).context("failed to load workflow rules")?,
        None => RuleSet::builtin(),
    };

    let context_builder = ContextBuilder::new(
        Arc::clone(&store),
        Arc::clone(&retriever),
        config.turns_limit,
        config.retrieval.broad_results,
    );
    let classifier = IntentClassifier::new(Arc::clone(&model) as _);
    let registry = standard_registry(model);

    Ok(Router::new(
        store,
        context_builder,
        classifier,
        rules,
        registry,
        retriever,
    ))
}

pub(crate) fn load_config() -> Result<Config> {
    ConfigLoader::load()
}
