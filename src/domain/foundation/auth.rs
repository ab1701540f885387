//! Authentication types for the domain layer.
//!
//! These types represent an authenticated actor extracted from a bearer token.
//! They have **no external dependencies** - any token issuer can populate them
//! via the `ActorValidator` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after JWT validation:
//! let actor = AuthenticatedActor::new(ActorId::new("owner-123")?, ActorRole::Owner, None);
//!
//! // Inject into request extensions for handlers to use
//! request.extensions_mut().insert(actor);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ActorId;

/// Which side of a tenancy the actor is on.
///
/// Recipient rules for outbound email differ by role: owners manage a trade
/// network, tenants may only reach trades working on their own property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Owner,
    Tenant,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorRole::Owner => write!(f, "owner"),
            ActorRole::Tenant => write!(f, "tenant"),
        }
    }
}

/// Authenticated actor extracted from a validated JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique actor identifier from the token `sub` claim.
    pub actor_id: ActorId,

    /// Role claim; defaults to owner when the token omits it.
    pub role: ActorRole,

    /// Email address from the token claims, if present.
    pub email: Option<String>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    pub fn new(actor_id: ActorId, role: ActorRole, email: Option<String>) -> Self {
        Self {
            actor_id,
            role,
            email,
        }
    }

    /// Returns true if the actor is a property owner.
    pub fn is_owner(&self) -> bool {
        self.role == ActorRole::Owner
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token carries a role claim this service does not recognise.
    #[error("Unsupported role claim: {0}")]
    UnsupportedRole(String),
}

impl AuthError {
    /// Returns true if this error indicates the caller should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
