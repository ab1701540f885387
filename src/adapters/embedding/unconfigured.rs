//! Placeholder backend used when no embedding credentials are configured.

use async_trait::async_trait;

use crate::ports::{EmbeddingBackend, EmbeddingError, EmbeddingOptions};

/// Every call fails with [`EmbeddingError::NotConfigured`], so semantic
/// memory always takes its fallback paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredEmbeddingBackend;

#[async_trait]
impl EmbeddingBackend for UnconfiguredEmbeddingBackend {
    async fn run(
        &self,
        _texts: &[String],
        _options: EmbeddingOptions,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::NotConfigured)
    }

    fn model(&self) -> &str {
        "unconfigured"
    }
}
