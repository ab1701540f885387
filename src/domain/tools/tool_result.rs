//! Tool execution result value object.
//!
//! Every handler, and the dispatcher itself, produces exactly one
//! [`ToolResult`]. Failures carry a human-readable message the model can
//! relay or act on; they never carry a stack trace.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool execution.
///
/// # Examples
///
/// ```ignore
/// let ok = ToolResult::success(json!({ "property_id": "prop-1" }));
/// assert!(ok.is_success());
///
/// let failed = ToolResult::failure("Property not found: prop-9");
/// assert_eq!(failed.message(), Some("Property not found: prop-9"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolResult {
    /// Tool ran and produced data for the model.
    Success { data: Value },

    /// Tool did not run, or ran and failed.
    Failure { message: String },
}

impl ToolResult {
    /// Creates a success result.
    pub fn success(data: Value) -> Self {
        Self::Success { data }
    }

    /// Creates a failure result.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Returns true if the tool executed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Success payload, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

/// Structured context plus natural-language guidance for the model.
///
/// Generator and workflow tools gather the data the model needs and tell it
/// what to do next; the model stays the single point of judgment. The
/// guidance type is whatever the tool needs (a plan, drafting notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidedOutput<G> {
    pub data: Value,
    pub guidance: G,
}

impl<G: Serialize> GuidedOutput<G> {
    /// Creates a guided output.
    pub fn new(data: Value, guidance: G) -> Self {
        Self { data, guidance }
    }

    /// Wraps the output in a success result.
    pub fn into_result(self) -> ToolResult {
        match serde_json::to_value(&self) {
            Ok(data) => ToolResult::success(data),
            Err(e) => ToolResult::failure(format!("Failed to serialize guidance: {}", e)),
        }
    }
}
