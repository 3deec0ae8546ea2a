//! Pmos - E-commerce PM Agent Router
//!
//! Pmos routes a product manager's natural-language query to one or more
//! specialist LLM-backed agents, enforces prerequisite ordering between them
//! based on conversation state, and threads state updates and clarification
//! requests through a multi-step execution.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, port traits, and domain errors
//! - **Service Layer** (`services`): The routing pipeline — context builder,
//!   intent classifier, workflow enforcer, sequencer, and the specialists
//! - **Infrastructure Layer** (`infrastructure`): SQLite session store,
//!   Anthropic model client, knowledge retrieval adapters, config loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use pmos::services::Router;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire a router and run a query
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentName, AgentOutput, AgentStatus, Classification, Config, DecisionState, EnrichedContext,
    Enforcement, ProblemState, RouteOutcome, RuleSet, Session, StateUpdates, Turn,
};
pub use domain::ports::{
    KnowledgeRetriever, ModelClient, NullRetriever, SessionStore, Specialist,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Router, SpecialistRegistry};
