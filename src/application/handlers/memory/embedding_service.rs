//! EmbeddingService - Text to normalised vector, with graceful absence.

use std::sync::Arc;

use crate::domain::memory::{similarity, Embedding};
use crate::ports::{EmbeddingBackend, EmbeddingError, EmbeddingOptions};

/// Wraps an optional embedding backend.
///
/// Guarantees for callers:
/// - blank input → zero vector of the configured dimension, no backend call
/// - anything else → unit-length vector of the configured dimension, or an error
pub struct EmbeddingService {
    backend: Option<Arc<dyn EmbeddingBackend>>,
    dimensions: usize,
    max_input_chars: usize,
}

impl EmbeddingService {
    pub fn new(backend: Arc<dyn EmbeddingBackend>, dimensions: usize, max_input_chars: usize) -> Self {
        Self {
            backend: Some(backend),
            dimensions,
            max_input_chars,
        }
    }

    /// A service with no backend; every non-blank embed fails with `NotConfigured`.
    pub fn disabled(dimensions: usize) -> Self {
        Self {
            backend: None,
            dimensions,
            max_input_chars: 0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Embedding::zero(self.dimensions));
        }

        let backend = self.backend.as_ref().ok_or(EmbeddingError::NotConfigured)?;
        let input: String = text.chars().take(self.max_input_chars).collect();

        let mut vectors = backend
            .run(&[input], EmbeddingOptions::default())
            .await?;
        let vector = vectors
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no vectors returned".to_string()))?;

        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            });
        }

        // Unit length regardless of backend options.
        Ok(Embedding::normalized(vector))
    }

    pub fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        similarity(a.as_slice(), b.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embedding::MockEmbeddingBackend;

    fn service() -> EmbeddingService {
        EmbeddingService::new(Arc::new(MockEmbeddingBackend::new(64)), 64, 20)
    }

    #[tokio::test]
    async fn blank_text_is_zero_vector() {
        let embedding = service().embed("   ").await.unwrap();

        assert_eq!(embedding.dimensions(), 64);
        assert!(embedding.is_zero());
    }

    #[tokio::test]
    async fn blank_text_needs_no_backend() {
        let embedding = EmbeddingService::disabled(768).embed("").await.unwrap();

        assert_eq!(embedding.dimensions(), 768);
    }

    #[tokio::test]
    async fn text_is_unit_length() {
        let embedding = service().embed("prefers plumbers who answer on weekends").await.unwrap();

        assert!((embedding.norm() - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn input_is_truncated_before_embedding() {
        let backend = Arc::new(MockEmbeddingBackend::new(64));
        let service = EmbeddingService::new(backend.clone(), 64, 5);

        service.embed("abcdefghij").await.unwrap();

        assert_eq!(backend.last_input().as_deref(), Some("abcde"));
    }

    #[tokio::test]
    async fn missing_backend_is_not_configured() {
        let result = EmbeddingService::disabled(768).embed("hello").await;

        assert_eq!(result, Err(EmbeddingError::NotConfigured));
    }

    #[tokio::test]
    async fn wrong_dimension_is_rejected() {
        let service = EmbeddingService::new(Arc::new(MockEmbeddingBackend::new(32)), 64, 100);

        let result = service.embed("hello").await;

        assert_eq!(
            result,
            Err(EmbeddingError::DimensionMismatch {
                expected: 64,
                got: 32
            })
        );
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let service = EmbeddingService::new(Arc::new(MockEmbeddingBackend::failing(64)), 64, 100);

        assert!(service.embed("hello").await.is_err());
    }

    #[tokio::test]
    async fn self_similarity_is_one() {
        let service = service();
        let e = service.embed("late rent reminder tone").await.unwrap();

        assert!((service.similarity(&e, &e) - 1.0).abs() < 1e-4);
    }
}
