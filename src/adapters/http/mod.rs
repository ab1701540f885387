//! HTTP adapters - REST API implementations.

pub mod middleware;
pub mod tools;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use tools::{tools_router, ToolsAppState};

/// The full application router.
///
/// - `GET /health`
/// - `GET /api/tools`
/// - `POST /api/tools/execute` (bearer token required)
pub fn app_router(tools_state: ToolsAppState, auth_state: AuthState) -> Router {
    Router::new()
        .route("/health", get(tools::health))
        .nest("/api/tools", tools_router())
        .with_state(tools_state)
        .layer(from_fn_with_state(auth_state, auth_middleware))
        .layer(TraceLayer::new_for_http())
}
