//! Mock notification dispatcher for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Notification, NotificationDispatcher};

/// Records dispatched notifications; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationDispatcher {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl MockNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDispatcher for MockNotificationDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "Mock dispatcher is down",
            ));
        }
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}
