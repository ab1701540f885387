//! Learning Sink Port - Consumer of classified tool failures.
//!
//! Receives the stable `{kind, message, details}` report. Delivery is
//! best-effort; the dispatcher never waits on it.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::learning::ClassifiedError;

#[async_trait]
pub trait LearningSink: Send + Sync {
    async fn record(&self, actor_id: &ActorId, error: ClassifiedError) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn learning_sink_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LearningSink>();
    }
}
