//! HS256 JWT validation.
//!
//! Tokens are issued by the main application with a shared secret. Claims:
//!
//! | claim   | required        | meaning                       |
//! |---------|-----------------|-------------------------------|
//! | `sub`   | yes             | actor id                      |
//! | `exp`   | yes             | expiry, Unix seconds          |
//! | `role`  | no              | `owner` (default) or `tenant` |
//! | `email` | no              | account address               |
//! | `aud`   | when configured | audience                      |
//! | `iss`   | when configured | issuer                        |

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{ActorId, ActorRole, AuthError, AuthenticatedActor};
use crate::ports::ActorValidator;

#[derive(Debug, Deserialize)]
struct ActorClaims {
    sub: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

pub struct JwtActorValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtActorValidator {
    pub fn new(secret: &str, audience: Option<&str>, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_audience.as_deref(),
            config.jwt_issuer.as_deref(),
        )
    }
}

fn parse_role(role: Option<&str>) -> Result<ActorRole, AuthError> {
    match role {
        None | Some("owner") => Ok(ActorRole::Owner),
        Some("tenant") => Ok(ActorRole::Tenant),
        Some(other) => Err(AuthError::UnsupportedRole(other.to_string())),
    }
}

#[async_trait]
impl ActorValidator for JwtActorValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedActor, AuthError> {
        let data = decode::<ActorClaims>(token, &self.key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    tracing::warn!("Token audience or issuer mismatch");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let claims = data.claims;
        let actor_id = ActorId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let role = parse_role(claims.role.as_deref())?;

        Ok(AuthenticatedActor::new(actor_id, role, claims.email))
    }
}
