//! Pushes a notification to the acting user's own devices.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::spawn_notification;
use crate::domain::tools::{ParamError, ToolCall, ToolResult};
use crate::ports::{Notification, NotificationDispatcher, ToolHandler, ToolHandlerError};

/// Delivery is fire-and-forget; the tool reports the notification as queued.
pub struct SendNotificationHandler {
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl SendNotificationHandler {
    pub fn new(dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ToolHandler for SendNotificationHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let title = call.require_str("title")?;
        let body = call.require_str("body")?;
        if title.trim().is_empty() {
            return Err(ParamError::Missing("title".to_string()).into());
        }
        let kind = call.optional_str("type")?.unwrap_or("agent_message");
        let data = call.input().get("data").cloned().unwrap_or(Value::Null);

        let notification =
            Notification::new(call.actor_id().clone(), kind, title, body).with_data(data);
        let id = notification.id;
        spawn_notification(self.dispatcher.clone(), notification);

        Ok(ToolResult::success(json!({
            "queued": true,
            "notification_id": id,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::MockNotificationDispatcher;
    use crate::domain::foundation::ActorId;
    use serde_json::Map;
    use std::time::Duration;

    fn call(input: Value) -> ToolCall {
        ToolCall::new(
            "send_notification",
            input.as_object().cloned().unwrap_or_else(Map::new),
            ActorId::new("owner-a").unwrap(),
        )
    }

    #[tokio::test]
    async fn queues_notification_for_actor() {
        let dispatcher = MockNotificationDispatcher::new();
        let handler = SendNotificationHandler::new(Arc::new(dispatcher.clone()));

        let result = handler
            .handle(&call(json!({ "title": "Rent received", "body": "Unit 2 paid." })))
            .await
            .unwrap();
        assert_eq!(result.data().unwrap()["queued"], true);

        for _ in 0..20 {
            if !dispatcher.sent().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let sent = dispatcher.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].actor_id.as_str(), "owner-a");
        assert_eq!(sent[0].kind, "agent_message");
    }

    #[tokio::test]
    async fn failed_delivery_still_reports_queued() {
        let handler = SendNotificationHandler::new(Arc::new(MockNotificationDispatcher::failing()));

        let result = handler
            .handle(&call(json!({ "title": "Hi", "body": "There" })))
            .await
            .unwrap();

        assert!(result.is_success());
    }

    #[tokio::test]
    async fn title_is_required() {
        let handler = SendNotificationHandler::new(Arc::new(MockNotificationDispatcher::new()));

        let err = handler.handle(&call(json!({ "body": "x" }))).await.unwrap_err();

        assert_eq!(err.to_string(), "Missing required parameter: title");
    }
}
