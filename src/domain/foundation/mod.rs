//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Rentwise domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{ActorRole, AuthError, AuthenticatedActor};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ActorId, DecisionId, NotificationId, PreferenceId};
pub use ownership::{require_owned, OwnedByActor};
pub use timestamp::Timestamp;
