//! Property Reader Port - Ownership-scoped property lookups.
//!
//! Every query filters by the acting owner. A property owned by someone else
//! is reported exactly like one that does not exist.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::workflow::PropertySnapshot;

#[async_trait]
pub trait PropertyReader: Send + Sync {
    /// One property, if `owner_id` owns it.
    async fn get_property(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<PropertySnapshot>, DomainError>;

    /// All of the owner's properties, by address.
    async fn list_properties(&self, owner_id: &ActorId) -> Result<Vec<PropertySnapshot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn property_reader_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PropertyReader>();
    }
}
