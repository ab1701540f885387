//! Mock email provider for testing.
//!
//! Records every email it is asked to send. Clones share the same record, so
//! a test can keep one clone and hand the other to the handler.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailProvider, OutboundEmail, SentEmail};

#[derive(Debug, Clone, Default)]
pub struct MockEmailProvider {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail: bool,
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that rejects every send.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Emails accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: OutboundEmail) -> Result<SentEmail, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::EmailProviderError,
                "Mock provider rejected the email",
            ));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(email);
        Ok(SentEmail {
            provider_id: format!("mock-{}", sent.len()),
        })
    }
}
