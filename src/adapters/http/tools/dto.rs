//! Data transfer objects for tools HTTP endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::learning::ClassifiedError;
use crate::domain::tools::{ToolMeta, ToolResult};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to execute a tool as the authenticated actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteToolRequest {
    /// Catalogued tool name
    pub tool_name: String,
    /// Tool input; must be a JSON object
    #[serde(default)]
    pub input: Map<String, Value>,
}

/// Query parameters for listing tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsQuery {
    /// Output format: "anthropic" (model-facing, stubs hidden) or "native"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "anthropic".to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Catalogue listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    pub format: String,
    pub count: usize,
    /// Tools with a registered handler
    pub implemented: usize,
    pub tools: Value,
}

/// One catalogue entry in native format.
#[derive(Debug, Clone, Serialize)]
pub struct ToolEntry {
    #[serde(flatten)]
    pub meta: ToolMeta,
    pub implemented: bool,
}

/// Outcome of one execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteToolResponse {
    pub tool_name: String,
    #[serde(flatten)]
    pub result: ToolResult,
    /// Present for failures when verbose errors are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Value>,
    pub duration_ms: u64,
}

impl ExecuteToolResponse {
    pub fn new(
        tool_name: String,
        result: ToolResult,
        diagnosis: Option<&ClassifiedError>,
        duration_ms: u64,
    ) -> Self {
        Self {
            tool_name,
            result,
            diagnosis: diagnosis.map(ClassifiedError::to_report),
            duration_ms,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub tools_registered: usize,
    pub tools_implemented: usize,
}

/// Error body for requests rejected before dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
