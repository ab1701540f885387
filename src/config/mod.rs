//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RENTWISE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use rentwise::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod email;
mod embedding;
mod error;
mod features;
mod memory;
mod notifications;
mod server;
mod workflow;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use embedding::EmbeddingConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use memory::MemoryConfig;
pub use notifications::NotificationConfig;
pub use server::{Environment, ServerConfig};
pub use workflow::WorkflowConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL + pgvector)
    pub database: DatabaseConfig,

    /// Authentication configuration (HS256 bearer tokens)
    pub auth: AuthConfig,

    /// Embedding backend configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Semantic memory thresholds and limits
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Workflow approval threshold and arrears ladder
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Email configuration (Resend)
    pub email: EmailConfig,

    /// Notification webhook
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RENTWISE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RENTWISE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `RENTWISE__MEMORY__SIMILARITY_THRESHOLD=0.5` -> `memory.similarity_threshold = 0.5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RENTWISE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.embedding.validate()?;
        self.memory.validate()?;
        self.workflow.validate()?;
        self.email.validate()?;
        self.notifications.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
