//! Embedding value object.
//!
//! Every embedding the memory subsystem hands out is L2-normalised (or all
//! zeros), so cosine similarity reduces to a dot product.

use serde::{Deserialize, Serialize};

/// Dense, L2-normalised text embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Normalises `values` to unit length.
    ///
    /// Vectors with zero or non-finite norm become the zero vector.
    pub fn normalized(mut values: Vec<f32>) -> Self {
        let norm = values.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            values.iter_mut().for_each(|x| *x = 0.0);
        } else {
            values.iter_mut().for_each(|x| *x /= norm);
        }
        Self(values)
    }

    /// All-zero vector of the given dimension.
    pub fn zero(dimensions: usize) -> Self {
        Self(vec![0.0; dimensions])
    }

    /// Returns true if every component is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    /// Number of components.
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// Euclidean length.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Borrows the components.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Cosine similarity with another embedding.
    pub fn similarity(&self, other: &Embedding) -> f32 {
        similarity(&self.0, &other.0)
    }
}

/// Dot product of two normalised vectors, clamped to `[-1, 1]`.
///
/// Mismatched or empty vectors score 0.0.
pub fn similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_has_unit_norm() {
        let e = Embedding::normalized(vec![3.0, 4.0]);
        assert!((e.norm() - 1.0).abs() < 1e-6);
        assert_eq!(e.as_slice().to_vec(), vec![0.6f32, 0.8f32]);
    }

    #[test]
    fn zero_input_stays_zero() {
        let e = Embedding::normalized(vec![0.0; 4]);
        assert!(e.is_zero());
        assert_eq!(e.dimensions(), 4);
    }

    #[test]
    fn non_finite_input_becomes_zero() {
        let e = Embedding::normalized(vec![f32::NAN, 1.0]);
        assert!(e.is_zero());
    }

    #[test]
    fn self_similarity_is_one() {
        let e = Embedding::normalized(vec![1.0, 2.0, 3.0]);
        assert!((e.similarity(&e) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_minus_one() {
        let a = Embedding::normalized(vec![1.0, 0.0]);
        let b = Embedding::normalized(vec![-1.0, 0.0]);
        assert!((a.similarity(&b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn mismatched_dimensions_score_zero() {
        assert_eq!(similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(similarity(&[], &[]), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let a = Embedding::normalized(vec![0.2, 0.9, -0.4]);
        let b = Embedding::normalized(vec![-0.7, 0.1, 0.5]);
        assert_eq!(a.similarity(&b), b.similarity(&a));
    }
}
