//! Axum router configuration for tools endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{execute_tool, list_tools, ToolsAppState};

/// Create the tools API router.
///
/// # Routes
///
/// - `GET /` - Tool catalogue (query: format)
/// - `POST /execute` - Execute a tool as the authenticated actor
///
/// Suitable for mounting at `/api/tools`.
pub fn tools_router() -> Router<ToolsAppState> {
    Router::new()
        .route("/", get(list_tools))
        .route("/execute", post(execute_tool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = tools_router();
    }
}
