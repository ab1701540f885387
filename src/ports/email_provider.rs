//! Email Provider Port - Outbound email delivery.
//!
//! Only the email guard's callers reach this port, and only after
//! authorisation succeeds; the provider itself performs no policy checks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::email::EmailContextType;
use crate::domain::foundation::DomainError;

/// Port for delivering one email.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<SentEmail, DomainError>;
}

/// A fully resolved email, ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub from_address: String,
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub context: EmailContextType,
    pub reply_to: Option<String>,
}

impl OutboundEmail {
    /// `Name <address>` as email headers expect it.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }
}

/// Provider acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub provider_id: String,
}
