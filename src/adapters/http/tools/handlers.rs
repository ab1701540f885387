//! HTTP handlers for tools endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::ToolDispatcher;
use crate::domain::tools::{ToolCall, ToolName};

use super::dto::{
    ExecuteToolRequest, ExecuteToolResponse, HealthResponse, ListToolsQuery, ListToolsResponse,
    ToolEntry,
};

/// Application state for tools endpoints.
#[derive(Clone)]
pub struct ToolsAppState {
    pub dispatcher: Arc<ToolDispatcher>,
    /// Include the classifier's diagnosis in failure responses
    pub verbose_errors: bool,
}

/// List the tool catalogue.
///
/// GET /api/tools?format=anthropic|native
pub async fn list_tools(
    State(state): State<ToolsAppState>,
    Query(query): Query<ListToolsQuery>,
) -> impl IntoResponse {
    let dispatcher = &state.dispatcher;

    let tools = match query.format.as_str() {
        "native" => {
            let entries: Vec<ToolEntry> = ToolName::ALL
                .iter()
                .map(|tool| ToolEntry {
                    meta: dispatcher.registry().meta(*tool),
                    implemented: dispatcher.is_implemented(*tool),
                })
                .collect();
            serde_json::to_value(entries).unwrap_or(serde_json::Value::Array(vec![]))
        }
        _ => serde_json::Value::Array(dispatcher.tool_catalog()),
    };

    let count = tools.as_array().map_or(0, |t| t.len());

    Json(ListToolsResponse {
        format: query.format,
        count,
        implemented: dispatcher.implemented_count(),
        tools,
    })
}

/// Execute a tool as the authenticated actor.
///
/// POST /api/tools/execute
///
/// Tool failures are still `200 OK`; the body's `status` says whether the
/// tool succeeded.
pub async fn execute_tool(
    State(state): State<ToolsAppState>,
    RequireAuth(actor): RequireAuth,
    Json(request): Json<ExecuteToolRequest>,
) -> impl IntoResponse {
    let call = ToolCall::new(&request.tool_name, request.input, actor.actor_id.clone())
        .with_role(actor.role);

    let started = Instant::now();
    let outcome = state.dispatcher.execute_and_classify(&call).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    let diagnosis = if state.verbose_errors {
        outcome.diagnosis.as_ref()
    } else {
        None
    };

    (
        StatusCode::OK,
        Json(ExecuteToolResponse::new(
            request.tool_name,
            outcome.result.clone(),
            diagnosis,
            duration_ms,
        )),
    )
}

/// Liveness check.
///
/// GET /health
pub async fn health(State(state): State<ToolsAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tools_registered: state.dispatcher.registry().len(),
        tools_implemented: state.dispatcher.implemented_count(),
    })
}
