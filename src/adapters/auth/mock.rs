//! Mock actor validator for testing.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockActorValidator::new()
//!     .with_owner("owner-token", "owner-123")
//!     .with_tenant("tenant-token", "tenant-456");
//!
//! let actor = validator.validate("owner-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, ActorRole, AuthError, AuthenticatedActor};
use crate::ports::ActorValidator;

/// Token table; tokens not in the table return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockActorValidator {
    tokens: RwLock<HashMap<String, AuthenticatedActor>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockActorValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(self, token: impl Into<String>, actor: AuthenticatedActor) -> Self {
        self.tokens.write().unwrap().insert(token.into(), actor);
        self
    }

    pub fn with_owner(self, token: impl Into<String>, actor_id: &str) -> Self {
        let actor = AuthenticatedActor::new(
            ActorId::new(actor_id).unwrap(),
            ActorRole::Owner,
            Some(format!("{}@test.example.com", actor_id)),
        );
        self.with_actor(token, actor)
    }

    pub fn with_tenant(self, token: impl Into<String>, actor_id: &str) -> Self {
        let actor = AuthenticatedActor::new(
            ActorId::new(actor_id).unwrap(),
            ActorRole::Tenant,
            Some(format!("{}@test.example.com", actor_id)),
        );
        self.with_actor(token, actor)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl ActorValidator for MockActorValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves() {
        let validator = MockActorValidator::new().with_tenant("t", "tenant-1");
        let actor = validator.validate("t").await.unwrap();
        assert_eq!(actor.role, ActorRole::Tenant);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockActorValidator::new();
        assert!(matches!(validator.validate("nope").await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockActorValidator::new()
            .with_owner("t", "owner-1")
            .with_error(AuthError::TokenExpired);
        assert!(matches!(validator.validate("t").await, Err(AuthError::TokenExpired)));
    }
}
