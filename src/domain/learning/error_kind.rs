//! Error taxonomy consumed by the learning pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a tool call failed, from the point of view of what should be learned.
///
/// The four wire names are a stable contract with the learning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Wrong tool, or malformed arguments.
    ToolMisuse,
    /// Referenced entity absent or inaccessible to this actor.
    ContextMissing,
    /// The requested mutation conflicts with existing data or constraints.
    FactualError,
    /// Everything else, infrastructure hiccups included.
    ReasoningError,
}

impl ErrorKind {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ToolMisuse => "TOOL_MISUSE",
            ErrorKind::ContextMissing => "CONTEXT_MISSING",
            ErrorKind::FactualError => "FACTUAL_ERROR",
            ErrorKind::ReasoningError => "REASONING_ERROR",
        }
    }

    /// Which learning artifact a failure of this kind improves.
    pub fn learning_target(&self) -> &'static str {
        match self {
            ErrorKind::ToolMisuse => "tool_guidance",
            ErrorKind::ContextMissing => "precondition_checks",
            ErrorKind::FactualError => "corrective_rules",
            ErrorKind::ReasoningError => "prompt_guidance",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_stable_wire_names() {
        for kind in [
            ErrorKind::ToolMisuse,
            ErrorKind::ContextMissing,
            ErrorKind::FactualError,
            ErrorKind::ReasoningError,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn deserializes_from_wire_name() {
        let kind: ErrorKind = serde_json::from_str("\"CONTEXT_MISSING\"").unwrap();
        assert_eq!(kind, ErrorKind::ContextMissing);
    }
}
