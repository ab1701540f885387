//! Embedding backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Embedding backend configuration (Workers AI compatible HTTP API)
///
/// The backend is optional. When `account_id` or `api_token` is missing,
/// semantic memory runs in fallback mode only.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Account the model runs under
    pub account_id: Option<String>,

    /// API token
    pub api_token: Option<String>,

    /// Embedding model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Vector dimension the model produces
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Input is cut to this many characters before embedding
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EmbeddingConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if the backend has credentials
    pub fn is_configured(&self) -> bool {
        self.account_id.as_ref().is_some_and(|k| !k.is_empty())
            && self.api_token.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate embedding configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidEmbeddingUrl);
        }

        if self.dimensions == 0 || self.dimensions > 4096 {
            return Err(ValidationError::InvalidEmbeddingDimensions);
        }

        if self.max_input_chars == 0 {
            return Err(ValidationError::MissingRequired("EMBEDDING__MAX_INPUT_CHARS"));
        }

        Ok(())
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            account_id: None,
            api_token: None,
            model: default_model(),
            base_url: default_base_url(),
            dimensions: default_dimensions(),
            max_input_chars: default_max_input_chars(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "@cf/baai/bge-base-en-v1.5".to_string()
}

fn default_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_dimensions() -> usize {
    768
}

fn default_max_input_chars() -> usize {
    2000
}

fn default_timeout() -> u64 {
    10
}
