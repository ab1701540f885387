//! Fire-and-forget notification delivery.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::ports::{Notification, NotificationDispatcher};

/// Dispatches `notification` on a detached task.
///
/// Failures are logged and dropped. The returned handle is only useful to
/// tests that need to wait for delivery.
pub fn spawn_notification(
    dispatcher: Arc<dyn NotificationDispatcher>,
    notification: Notification,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let id = notification.id;
        let actor_id = notification.actor_id.clone();
        let kind = notification.kind.clone();

        match dispatcher.dispatch(notification).await {
            Ok(()) => tracing::debug!(%id, actor_id = %actor_id, kind = %kind, "Notification sent"),
            Err(e) => tracing::warn!(
                %id,
                actor_id = %actor_id,
                kind = %kind,
                error = %e,
                "Notification dispatch failed"
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::MockNotificationDispatcher;
    use crate::domain::foundation::ActorId;

    #[tokio::test]
    async fn delivers_in_background() {
        let dispatcher = MockNotificationDispatcher::new();
        let n = Notification::new(ActorId::new("owner-1").unwrap(), "email_sent", "Sent", "Done");

        spawn_notification(Arc::new(dispatcher.clone()), n).await.unwrap();

        assert_eq!(dispatcher.sent().len(), 1);
    }

    #[tokio::test]
    async fn failure_does_not_panic() {
        let dispatcher = MockNotificationDispatcher::failing();
        let n = Notification::new(ActorId::new("owner-1").unwrap(), "email_sent", "Sent", "Done");

        let joined = spawn_notification(Arc::new(dispatcher.clone()), n).await;

        assert!(joined.is_ok());
        assert!(dispatcher.sent().is_empty());
    }
}
