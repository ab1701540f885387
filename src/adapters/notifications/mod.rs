//! Notification adapters - webhook delivery, logging fallback, and a mock.

mod mock;
mod webhook;

pub use mock::MockNotificationDispatcher;
pub use webhook::{LogNotificationDispatcher, WebhookConfig, WebhookNotificationDispatcher};
