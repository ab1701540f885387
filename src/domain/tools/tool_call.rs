//! Tool call - one model-emitted request to run a tool.
//!
//! Also hosts the typed accessors handlers use to pull parameters out of the
//! free-form input map. Their error messages are worded so the error
//! classifier files them under tool misuse.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::foundation::{ActorId, ActorRole};

/// Parameter extraction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Missing required parameter: {0}")]
    Missing(String),

    #[error("Invalid parameter '{name}': expected {expected}, got {got}")]
    WrongType {
        name: String,
        expected: &'static str,
        got: &'static str,
    },
}

/// A request to invoke a tool on behalf of an authenticated actor.
///
/// Immutable once built; the dispatcher and handlers only ever borrow it.
///
/// # Examples
///
/// ```ignore
/// let call = ToolCall::new(
///     "get_property",
///     json!({ "property_id": "prop-1" }).as_object().cloned().unwrap_or_default(),
///     ActorId::new("owner-1")?,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool as emitted by the model
    name: String,

    /// Tool input (JSON object)
    input: Map<String, Value>,

    /// Identity the call executes as
    actor_id: ActorId,

    /// Role of the actor; owners unless stated otherwise
    #[serde(default = "default_role")]
    role: ActorRole,
}

fn default_role() -> ActorRole {
    ActorRole::Owner
}

impl ToolCall {
    /// Creates a new tool call for an owner.
    pub fn new(name: impl Into<String>, input: Map<String, Value>, actor_id: ActorId) -> Self {
        Self {
            name: name.into(),
            input,
            actor_id,
            role: ActorRole::Owner,
        }
    }

    /// Sets the actor's role.
    pub fn with_role(mut self, role: ActorRole) -> Self {
        self.role = role;
        self
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the input map.
    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    /// Returns the acting identity.
    pub fn actor_id(&self) -> &ActorId {
        &self.actor_id
    }

    /// Returns the acting role.
    pub fn role(&self) -> ActorRole {
        self.role
    }

    /// Required non-empty string parameter.
    pub fn require_str(&self, key: &str) -> Result<&str, ParamError> {
        match self.optional_str(key)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(ParamError::Missing(key.to_string())),
        }
    }

    /// Optional string parameter; `null` counts as absent.
    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, ParamError> {
        match self.input.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    /// Optional number parameter.
    pub fn optional_f64(&self, key: &str) -> Result<Option<f64>, ParamError> {
        match self.input.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(wrong_type(key, "number", other)),
        }
    }

    /// Optional integer parameter.
    pub fn optional_i64(&self, key: &str) -> Result<Option<i64>, ParamError> {
        match self.input.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| wrong_type(key, "integer", &Value::Number(n.clone()))),
            Some(other) => Err(wrong_type(key, "integer", other)),
        }
    }

    /// Optional boolean parameter.
    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, ParamError> {
        match self.input.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_type(key, "boolean", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str, got: &Value) -> ParamError {
    ParamError::WrongType {
        name: key.to_string(),
        expected,
        got: json_type_name(got),
    }
}

/// JSON type name as the model would recognise it.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
