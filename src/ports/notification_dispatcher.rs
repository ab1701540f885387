//! Notification Dispatcher Port - Push delivery to an actor's devices.
//!
//! Best-effort. Callers go through `application::spawn_notification`, which
//! runs the dispatch on a detached task and only logs failures; a failed
//! notification never fails the tool that triggered it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{ActorId, DomainError, NotificationId};

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError>;
}

/// `dispatch(actor_id, type, title, body, data)` as one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub actor_id: ActorId,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: Value,
}

impl Notification {
    pub fn new(
        actor_id: ActorId,
        kind: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            actor_id,
            kind: kind.into(),
            title: title.into(),
            body: body.into(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}
