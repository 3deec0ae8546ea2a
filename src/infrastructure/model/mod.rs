//! Model-call adapters.

pub mod anthropic;
pub mod mock;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use mock::MockModelClient;
