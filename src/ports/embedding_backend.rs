//! Embedding Backend Port - Interface for the text embedding model.
//!
//! The backend is an optional capability. Callers in the memory layer treat
//! every [`EmbeddingError`] as "semantic search unavailable" and fall back to
//! non-semantic listing; nothing here is allowed to fail a tool call.

use async_trait::async_trait;
use thiserror::Error;

/// Port for running an embedding model over a batch of texts.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds each text; the output has one vector per input, in order.
    async fn run(
        &self,
        texts: &[String],
        options: EmbeddingOptions,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

/// Pooling and normalisation requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingOptions {
    pub mean_pool: bool,
    pub normalize: bool,
}

impl Default for EmbeddingOptions {
    fn default() -> Self {
        Self {
            mean_pool: true,
            normalize: true,
        }
    }
}

/// Embedding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("Embedding backend is not configured")]
    NotConfigured,

    #[error("Embedding backend unavailable: {0}")]
    Unavailable(String),

    #[error("Embedding backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Embedding response malformed: {0}")]
    InvalidResponse(String),

    #[error("Embedding has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}
