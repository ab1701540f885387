//! `send_email` tool.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::{EmailContextGuard, EmailRequest};
use crate::application::spawn_notification;
use crate::domain::tools::{ParamError, ToolCall, ToolResult};
use crate::ports::{
    EmailProvider, Notification, NotificationDispatcher, OutboundEmail, ToolHandler,
    ToolHandlerError,
};

/// Authorizes through the guard, then hands off to the provider.
///
/// Nothing reaches the provider unless the guard accepts the context, the
/// recipient and the sender.
pub struct SendEmailHandler {
    guard: Arc<EmailContextGuard>,
    provider: Arc<dyn EmailProvider>,
    notifier: Option<Arc<dyn NotificationDispatcher>>,
}

impl SendEmailHandler {
    pub fn new(guard: Arc<EmailContextGuard>, provider: Arc<dyn EmailProvider>) -> Self {
        Self {
            guard,
            provider,
            notifier: None,
        }
    }

    /// Sends an `email_sent` notification to the actor after each delivery.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationDispatcher>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

fn require_text<'a>(call: &'a ToolCall, key: &str) -> Result<&'a str, ParamError> {
    let value = call.require_str(key)?;
    if value.trim().is_empty() {
        return Err(ParamError::Missing(key.to_string()));
    }
    Ok(value)
}

#[async_trait]
impl ToolHandler for SendEmailHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let context_type = call.require_str("context_type")?;
        let to = call.require_str("to")?;
        let subject = require_text(call, "subject")?;
        let body = require_text(call, "body")?;
        let recipient_type = call.optional_str("recipient_type")?;

        let authorized = self
            .guard
            .authorize(
                EmailRequest {
                    context_type,
                    recipient_type,
                    to,
                },
                Some(call.actor_id()),
                call.role(),
            )
            .await?;

        let body = match &authorized.sender.persona {
            Some(persona) => format!("{}\n\n{}", body.trim_end(), persona.signature),
            None => body.to_string(),
        };

        let email = OutboundEmail {
            from_address: authorized.sender.from_address.clone(),
            from_name: authorized.sender.from_name.clone(),
            to: authorized.to.clone(),
            subject: subject.to_string(),
            body,
            context: authorized.context,
            reply_to: None,
        };
        let from = email.from_header();

        let sent = self.provider.send(email).await?;

        tracing::info!(
            actor_id = %call.actor_id(),
            context = %authorized.context,
            provider_id = %sent.provider_id,
            "Email sent"
        );

        if let Some(notifier) = &self.notifier {
            let notification = Notification::new(
                call.actor_id().clone(),
                "email_sent",
                format!("Email sent to {}", authorized.to),
                subject.to_string(),
            )
            .with_data(json!({
                "context_type": authorized.context,
                "provider_id": sent.provider_id,
            }));
            spawn_notification(notifier.clone(), notification);
        }

        Ok(ToolResult::success(json!({
            "sent": true,
            "provider_id": sent.provider_id,
            "context_type": authorized.context,
            "recipient_type": authorized.recipient_type,
            "to": authorized.to,
            "from": from,
        })))
    }
}
