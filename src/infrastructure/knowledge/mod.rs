//! Knowledge-retrieval adapters.

pub mod http;
pub mod recording;

pub use http::{HttpRetriever, HttpRetrieverConfig};
pub use recording::RecordingRetriever;
