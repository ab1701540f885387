//! Webhook Dispatcher - posts notifications to a push relay.
//!
//! The relay owns device tokens and fan-out; this adapter only delivers the
//! JSON payload. Without a configured URL the logging dispatcher is used.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::NotificationConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, NotificationDispatcher};

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            timeout: Duration::from_secs(5),
        }
    }

    /// `None` when no webhook URL is configured.
    pub fn from_app_config(config: &NotificationConfig) -> Option<Self> {
        let url = config.webhook_url.clone()?;
        let mut webhook = Self::new(url).with_timeout(config.timeout());
        if let Some(token) = &config.webhook_token {
            webhook = webhook.with_token(token.clone());
        }
        Some(webhook)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct WebhookNotificationDispatcher {
    config: WebhookConfig,
    client: Client,
}

impl WebhookNotificationDispatcher {
    pub fn new(config: WebhookConfig) -> Result<Self, DomainError> {
        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            DomainError::new(
                ErrorCode::NotificationError,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookNotificationDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        let mut request = self.client.post(&self.config.url).json(&notification);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            DomainError::new(
                ErrorCode::NotificationError,
                format!("Notification webhook failed: {}", e),
            )
        })?;

        if !response.status().is_success() {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Notification webhook returned {}", response.status().as_u16()),
            ));
        }
        Ok(())
    }
}

/// Dispatcher used when no webhook is configured. Logs and succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for LogNotificationDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        tracing::info!(
            actor_id = %notification.actor_id,
            kind = %notification.kind,
            title = %notification.title,
            "Notification (no webhook configured)"
        );
        Ok(())
    }
}
