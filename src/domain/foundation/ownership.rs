//! Ownership trait for actor-owned records.
//!
//! Every record a tool reads or mutates belongs to exactly one owning actor.
//! Reads are filtered by owner *before* anything is returned, so a record
//! owned by someone else is indistinguishable from a record that does not
//! exist. That keeps one owner's data from leaking to another and lets the
//! error classifier treat the miss as missing context.
//!
//! # Example
//!
//! ```ignore
//! impl OwnedByActor for PropertyRecord {
//!     fn owner_id(&self) -> &ActorId {
//!         &self.owner_id
//!     }
//! }
//!
//! let property = store.get(id).and_then(|p| p.visible_to(&actor_id));
//! ```

use super::{ActorId, DomainError};

/// Trait for records that have a single owning actor.
pub trait OwnedByActor {
    /// Returns the ID of the actor who owns this record.
    fn owner_id(&self) -> &ActorId;

    /// Checks if the given actor is the owner.
    fn is_owner(&self, actor_id: &ActorId) -> bool {
        self.owner_id() == actor_id
    }

    /// Returns the record only if `actor_id` owns it.
    fn visible_to(self, actor_id: &ActorId) -> Option<Self>
    where
        Self: Sized,
    {
        if self.is_owner(actor_id) {
            Some(self)
        } else {
            None
        }
    }
}

/// Filters an optional record by owner, mapping a miss to a not-found error.
///
/// Used by readers that fetch by primary key and then scope to the caller.
pub fn require_owned<T: OwnedByActor>(
    record: Option<T>,
    actor_id: &ActorId,
    entity: &str,
    id: &str,
) -> Result<T, DomainError> {
    record
        .and_then(|r| r.visible_to(actor_id))
        .ok_or_else(|| DomainError::not_found(entity, id))
}
