//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Use the embedding backend for recall and precedent search
    #[serde(default = "default_true")]
    pub enable_semantic_memory: bool,

    /// Forward classified failures to the learning sink
    #[serde(default = "default_true")]
    pub enable_learning: bool,

    /// Show detailed error messages (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_semantic_memory: true,
            enable_learning: true,
            verbose_errors: false,
        }
    }
}

fn default_true() -> bool {
    true
}
