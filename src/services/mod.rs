//! Service layer: the routing pipeline.
//!
//! Pipeline: context builder → intent classifier → workflow enforcer →
//! agent execution sequencer → state persistence. The `Router` wires the
//! steps together; everything below it is a pure function or a small
//! component depending only on domain ports.

pub mod context_builder;
pub mod intent_classifier;
pub mod roster;
pub mod router;
pub mod sequencer;
pub mod specialists;
pub mod workflow_enforcer;

pub use context_builder::ContextBuilder;
pub use intent_classifier::IntentClassifier;
pub use router::Router;
pub use sequencer::{execute_sequence, SpecialistRegistry};
pub use workflow_enforcer::enforce;
