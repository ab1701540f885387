//! Actor validation port for bearer token validation.
//!
//! HTTP middleware uses this to turn a bearer token into the
//! [`AuthenticatedActor`] every tool call executes as.
//!
//! # Example Implementation
//!
//! ```ignore
//! pub struct JwtActorValidator { ... }
//!
//! #[async_trait]
//! impl ActorValidator for JwtActorValidator {
//!     async fn validate(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
//!         // 1. Verify the HS256 signature
//!         // 2. Check exp (and aud/iss when configured)
//!         // 3. Map sub + role claims to AuthenticatedActor
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedActor};

/// Validates access tokens and extracts the acting identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate expiry, plus issuer and audience when configured
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait ActorValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix) and return the actor.
    async fn validate(&self, token: &str) -> Result<AuthenticatedActor, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ActorId, ActorRole};
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestActorValidator {
        tokens: RwLock<HashMap<String, AuthenticatedActor>>,
    }

    impl TestActorValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, actor: AuthenticatedActor) {
            self.tokens.write().unwrap().insert(token.to_string(), actor);
        }
    }

    #[async_trait]
    impl ActorValidator for TestActorValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn actor_validator_returns_actor_for_valid_token() {
        let validator = TestActorValidator::new();
        validator.add_valid_token(
            "valid-token-123",
            AuthenticatedActor::new(ActorId::new("owner-123").unwrap(), ActorRole::Owner, None),
        );

        let actor = validator.validate("valid-token-123").await.unwrap();

        assert_eq!(actor.actor_id.as_str(), "owner-123");
        assert!(actor.is_owner());
    }

    #[tokio::test]
    async fn actor_validator_returns_error_for_invalid_token() {
        let validator = TestActorValidator::new();

        let result = validator.validate("invalid-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn actor_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ActorValidator>();
    }
}
