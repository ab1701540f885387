//! Embedding adapters.
//!
//! - `WorkersAiEmbeddingBackend` - HTTP backend for Workers AI embedding models
//! - `MockEmbeddingBackend` - deterministic bag-of-words vectors for tests
//! - `UnconfiguredEmbeddingBackend` - stands in when no credentials are set

mod mock_backend;
mod unconfigured;
mod workers_ai_backend;

pub use mock_backend::MockEmbeddingBackend;
pub use unconfigured::UnconfiguredEmbeddingBackend;
pub use workers_ai_backend::{WorkersAiConfig, WorkersAiEmbeddingBackend};
