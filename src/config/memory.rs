//! Semantic memory configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::memory::MemoryLimits;

/// Similarity cutoff and result caps for recall and precedent search
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Minimum similarity for a semantic hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Maximum preferences returned by recall
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,

    /// Maximum decisions returned by precedent search
    #[serde(default = "default_precedent_limit")]
    pub precedent_limit: usize,

    /// Maximum rows returned by a fallback listing
    #[serde(default = "default_fallback_limit")]
    pub fallback_limit: usize,
}

impl MemoryConfig {
    /// Domain view of these settings
    pub fn limits(&self) -> MemoryLimits {
        MemoryLimits {
            similarity_threshold: self.similarity_threshold,
            recall_limit: self.recall_limit,
            precedent_limit: self.precedent_limit,
            fallback_limit: self.fallback_limit,
        }
    }

    /// Validate memory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ValidationError::InvalidSimilarityThreshold);
        }

        if self.recall_limit == 0 || self.precedent_limit == 0 || self.fallback_limit == 0 {
            return Err(ValidationError::InvalidMemoryLimit);
        }

        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            recall_limit: default_recall_limit(),
            precedent_limit: default_precedent_limit(),
            fallback_limit: default_fallback_limit(),
        }
    }
}

fn default_similarity_threshold() -> f32 {
    0.4
}

fn default_recall_limit() -> usize {
    10
}

fn default_precedent_limit() -> usize {
    5
}

fn default_fallback_limit() -> usize {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_domain_defaults() {
        assert_eq!(MemoryConfig::default().limits(), MemoryLimits::default());
    }

    #[test]
    fn test_validation_threshold_range() {
        let config = MemoryConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSimilarityThreshold)
        ));
    }

    #[test]
    fn test_validation_zero_limit() {
        let config = MemoryConfig {
            precedent_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
