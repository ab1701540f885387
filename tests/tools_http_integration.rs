//! Integration tests for the tools HTTP endpoints.
//!
//! These tests drive the full router with `tower::ServiceExt::oneshot`:
//! 1. Health and catalogue endpoints are public
//! 2. Execution requires a bearer token
//! 3. Tool failures are `200 OK` with a failure body
//! 4. Diagnoses are only returned when verbose errors are on

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rentwise::adapters::auth::MockActorValidator;
use rentwise::adapters::http::{app_router, AuthState, ToolsAppState};
use rentwise::adapters::memory::InMemoryPropertyReader;
use rentwise::application::handlers::{GetPropertyHandler, ToolDispatcher};
use rentwise::domain::foundation::ActorId;
use rentwise::domain::tools::{ToolName, ToolRegistry};
use rentwise::domain::workflow::PropertySnapshot;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn app(verbose_errors: bool) -> Router {
    let properties = InMemoryPropertyReader::new();
    properties
        .insert(PropertySnapshot {
            id: "p-1".to_string(),
            owner_id: ActorId::new("owner-a").unwrap(),
            address: "1 Harbour St".to_string(),
            status: "vacant".to_string(),
            weekly_rent_cents: None,
        })
        .await;

    let dispatcher = ToolDispatcher::new().register(
        ToolName::GetProperty,
        Arc::new(GetPropertyHandler::new(Arc::new(properties))),
    );

    let auth: AuthState = Arc::new(
        MockActorValidator::new()
            .with_owner("token-a", "owner-a")
            .with_owner("token-b", "owner-b"),
    );

    app_router(
        ToolsAppState {
            dispatcher: Arc::new(dispatcher),
            verbose_errors,
        },
        auth,
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn execute_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/tools/execute")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn health_reports_catalogue_size() {
    let response = app(false)
        .await
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tools_registered"], ToolRegistry::global().len());
    assert_eq!(body["tools_implemented"], 1);
}

#[tokio::test]
async fn list_tools_defaults_to_model_format() {
    let response = app(false)
        .await
        .oneshot(Request::get("/api/tools").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["format"], "anthropic");
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), ToolRegistry::global().to_anthropic_tools().len());
    assert!(tools.iter().all(|t| t.get("input_schema").is_some()));
}

#[tokio::test]
async fn native_format_marks_implemented_tools() {
    let response = app(false)
        .await
        .oneshot(
            Request::get("/api/tools?format=native")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), ToolName::ALL.len());

    let get_property = tools.iter().find(|t| t["name"] == "get_property").unwrap();
    assert_eq!(get_property["implemented"], true);
    let list_properties = tools.iter().find(|t| t["name"] == "list_properties").unwrap();
    assert_eq!(list_properties["implemented"], false);
}

// =============================================================================
// Execution
// =============================================================================

#[tokio::test]
async fn execute_without_token_is_unauthorized() {
    let response = app(false)
        .await
        .oneshot(execute_request(
            None,
            json!({ "tool_name": "get_property", "input": { "property_id": "p-1" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn execute_with_bad_token_is_unauthorized() {
    let response = app(false)
        .await
        .oneshot(execute_request(
            Some("nope"),
            json!({ "tool_name": "get_property", "input": { "property_id": "p-1" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_can_read_own_property() {
    let response = app(false)
        .await
        .oneshot(execute_request(
            Some("token-a"),
            json!({ "tool_name": "get_property", "input": { "property_id": "p-1" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["tool_name"], "get_property");
    assert_eq!(body["data"]["property"]["address"], "1 Harbour St");
}

#[tokio::test]
async fn other_owner_gets_failure_body_not_error_status() {
    let response = app(false)
        .await
        .oneshot(execute_request(
            Some("token-b"),
            json!({ "tool_name": "get_property", "input": { "property_id": "p-1" } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "failure");
    assert!(body["message"].as_str().unwrap().contains("Property not found: p-1"));
    assert!(body.get("diagnosis").map_or(true, Value::is_null));
}

#[tokio::test]
async fn verbose_errors_include_diagnosis() {
    let response = app(true)
        .await
        .oneshot(execute_request(
            Some("token-a"),
            json!({ "tool_name": "list_properties" }),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["status"], "failure");
    assert_eq!(body["diagnosis"]["kind"], "TOOL_MISUSE");
}
