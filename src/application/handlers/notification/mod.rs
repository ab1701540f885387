//! `send_notification` tool.

mod send_notification;

pub use send_notification::SendNotificationHandler;
