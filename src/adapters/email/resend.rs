//! Resend Provider - Implementation of EmailProvider over the Resend API.
//!
//! Sends `POST {base_url}/emails` with a bearer API key and a plain-text body.
//! Policy checks happen before this adapter is reached.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailProvider, OutboundEmail, SentEmail};

#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn from_app_config(config: &EmailConfig) -> Self {
        Self::new(config.resend_api_key.clone())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    tags: [Tag<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Tag<'a> {
    name: &'static str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

pub struct ResendEmailProvider {
    config: ResendConfig,
    client: Client,
}

impl ResendEmailProvider {
    pub fn new(config: ResendConfig) -> Result<Self, DomainError> {
        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            DomainError::new(
                ErrorCode::EmailProviderError,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;
        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }
}

fn request_body(email: &OutboundEmail) -> SendRequest<'_> {
    SendRequest {
        from: email.from_header(),
        to: [email.to.as_str()],
        subject: &email.subject,
        text: &email.body,
        reply_to: email.reply_to.as_deref(),
        tags: [Tag {
            name: "context_type",
            value: email.context.as_str(),
        }],
    }
}

#[async_trait]
impl EmailProvider for ResendEmailProvider {
    async fn send(&self, email: OutboundEmail) -> Result<SentEmail, DomainError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request_body(&email))
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::EmailProviderError, format!("Email send failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), context = %email.context, "Resend rejected email");
            return Err(DomainError::new(
                ErrorCode::EmailProviderError,
                format!("Email provider returned {}: {}", status.as_u16(), body),
            ));
        }

        let body: SendResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::EmailProviderError,
                format!("Invalid email provider response: {}", e),
            )
        })?;

        Ok(SentEmail {
            provider_id: body.id,
        })
    }
}
