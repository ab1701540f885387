//! Notification delivery configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Push delivery webhook. Without a URL, notifications are logged and dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Endpoint that fans notifications out to devices
    pub webhook_url: Option<String>,

    /// Bearer token sent with each webhook call
    pub webhook_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotificationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.webhook_url {
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                Err(ValidationError::InvalidWebhookUrl)
            }
            _ => Ok(()),
        }
    }
}

fn default_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_valid() {
        assert!(NotificationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let config = NotificationConfig {
            webhook_url: Some("mailto:ops@example.com".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
