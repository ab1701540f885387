//! Bearer-token authentication for the tool API.
//!
//! `auth_middleware` resolves the token through the `ActorValidator` port and
//! stores the `AuthenticatedActor` in the request extensions. Routes that act
//! on behalf of a user take the [`RequireAuth`] extractor; `/health` and the
//! tool catalogue do not, so a request without a token is passed through.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::foundation::{AuthError, AuthenticatedActor};
use crate::ports::ActorValidator;

pub type AuthState = Arc<dyn ActorValidator>;

/// Validates the bearer token when one is present.
///
/// A token that fails validation is rejected here and never reaches a
/// handler. An unsupported role claim is 403, anything else 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(actor) => {
            request.extensions_mut().insert(actor);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Bearer token rejected");
            let status = match e {
                AuthError::UnsupportedRole(_) => StatusCode::FORBIDDEN,
                AuthError::InvalidToken | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            };
            error_response(status, &e.to_string(), "AUTH_ERROR")
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn error_response(status: StatusCode, message: &str, code: &str) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}

/// The actor the middleware authenticated. Rejects with 401 when there is none.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedActor);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedActor>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection)
    }
}

/// No authenticated actor on a route that needs one.
#[derive(Debug, Clone, Copy)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        error_response(StatusCode::UNAUTHORIZED, "Authentication required", "UNAUTHENTICATED")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockActorValidator;
    use axum::{body::Body, middleware::from_fn_with_state, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(RequireAuth(actor): RequireAuth) -> String {
        format!("{}:{}", actor.actor_id, actor.role)
    }

    fn app(validator: MockActorValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/whoami", get(whoami))
            .route("/open", get(|| async { "ok" }))
            .layer(from_fn_with_state(state, auth_middleware))
    }

    async fn status_of(app: Router, path: &str, auth: Option<&str>) -> StatusCode {
        let mut request = axum::http::Request::builder().uri(path);
        if let Some(value) = auth {
            request = request.header(AUTHORIZATION, value);
        }
        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let app = app(MockActorValidator::new().with_tenant("t-token", "tenant-1"));
        assert_eq!(status_of(app, "/whoami", Some("Bearer t-token")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_token_passes_open_routes_only() {
        assert_eq!(status_of(app(MockActorValidator::new()), "/open", None).await, StatusCode::OK);
        assert_eq!(
            status_of(app(MockActorValidator::new()), "/whoami", None).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn expired_token_is_rejected_even_on_open_routes() {
        let app = app(MockActorValidator::new().with_error(AuthError::TokenExpired));
        assert_eq!(status_of(app, "/open", Some("Bearer old")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unsupported_role_is_forbidden() {
        let app = app(
            MockActorValidator::new().with_error(AuthError::UnsupportedRole("admin".to_string())),
        );
        assert_eq!(status_of(app, "/whoami", Some("Bearer x")).await, StatusCode::FORBIDDEN);
    }

    #[test]
    fn bearer_token_requires_scheme_and_value() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
