//! Recipient Directory Port - Who an actor is allowed to email.
//!
//! The email guard asks these questions before any provider call. Each answer
//! is a relationship check against the actor's own data; nothing here lists
//! or browses another actor's contacts.
//!
//! Addresses are compared case-insensitively by implementations.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};

#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    /// Is `email` a tenant on any property the owner owns?
    async fn is_tenant_of_owner(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError>;

    /// Is `email` a trade in the owner's saved trade network?
    async fn is_trade_in_network(&self, owner_id: &ActorId, email: &str) -> Result<bool, DomainError>;

    /// Is `email` a trade assigned to an active job on one of the owner's properties?
    async fn is_trade_on_active_job(
        &self,
        owner_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Is `email` a trade assigned to an open work order on a property the
    /// tenant currently rents?
    async fn is_trade_on_tenant_work_order(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Does `email` belong to the owner of a property the tenant currently rents?
    async fn is_owner_of_tenant_property(
        &self,
        tenant_id: &ActorId,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// The actor's own account address, if known.
    async fn actor_email(&self, actor_id: &ActorId) -> Result<Option<String>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recipient_directory_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RecipientDirectory>();
    }
}
