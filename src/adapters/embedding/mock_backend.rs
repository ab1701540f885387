//! Mock embedding backend for testing.
//!
//! Produces deterministic bag-of-words vectors: every lower-cased word is
//! hashed into one bucket. Texts sharing words score as similar, which is
//! enough to exercise ranking and thresholds without a model.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockEmbeddingBackend::new(768);
//! let failing = MockEmbeddingBackend::failing(768);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::email::fnv1a_32;
use crate::ports::{EmbeddingBackend, EmbeddingError, EmbeddingOptions};

#[derive(Debug, Clone)]
pub struct MockEmbeddingBackend {
    dimensions: usize,
    fail_with: Option<EmbeddingError>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockEmbeddingBackend {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            fail_with: None,
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A backend whose every call fails as unavailable.
    pub fn failing(dimensions: usize) -> Self {
        Self {
            fail_with: Some(EmbeddingError::Unavailable("mock backend down".to_string())),
            ..Self::new(dimensions)
        }
    }

    /// Number of texts embedded (or attempted).
    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    /// Last text received.
    pub fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }

    fn vectorize(&self, text: &str, normalize: bool) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        if self.dimensions == 0 {
            return vector;
        }
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = fnv1a_32(word.to_lowercase().as_bytes()) as usize % self.dimensions;
            vector[bucket] += 1.0;
        }
        if normalize {
            let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                vector.iter_mut().for_each(|x| *x /= norm);
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingBackend for MockEmbeddingBackend {
    async fn run(
        &self,
        texts: &[String],
        options: EmbeddingOptions,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.inputs.lock().unwrap().extend(texts.iter().cloned());

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        Ok(texts
            .iter()
            .map(|t| self.vectorize(t, options.normalize))
            .collect())
    }

    fn model(&self) -> &str {
        "mock-bag-of-words"
    }
}
