//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least 32 bytes in production")]
    WeakJwtSecret,

    #[error("Embedding base URL must be http(s)")]
    InvalidEmbeddingUrl,

    #[error("Embedding dimensions must be between 1 and 4096")]
    InvalidEmbeddingDimensions,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Similarity threshold must be between -1 and 1")]
    InvalidSimilarityThreshold,

    #[error("Memory result limits must be at least 1")]
    InvalidMemoryLimit,

    #[error("Arrears ladder days must be positive and strictly increasing")]
    InvalidArrearsLadder,

    #[error("Notification webhook URL must be http(s)")]
    InvalidWebhookUrl,
}
