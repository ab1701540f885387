//! Error classifier - deterministic triage of failed tool calls.
//!
//! Classification is a pure function of `(tool_name, input, message)`. The
//! message is lower-cased and checked against pattern tables in a fixed
//! priority order, so an ambiguous message always lands in the same bucket:
//!
//! 1. tool misuse
//! 2. missing context
//! 3. factual error
//! 4. reasoning error (fallback)
//!
//! The classifier never fails; anything unmatched is a reasoning error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ErrorKind;
use crate::domain::tools::ToolRegistry;

/// Longest string kept verbatim in an input summary, in characters.
pub const SUMMARY_MAX_CHARS: usize = 100;

const MISUSE_PATTERNS: &[&str] = &[
    "unknown tool",
    "not yet implemented",
    "coming soon",
    "missing required",
    "required parameter",
    "invalid parameter",
    "invalid argument",
];

const CONTEXT_PATTERNS: &[&str] = &[
    "not found",
    "no data",
    "no rows",
    "does not exist",
    "access denied",
    "permission denied",
    "forbidden",
    "not authorized",
    "unauthorized",
    "does not belong",
];

const FACTUAL_PATTERNS: &[&str] = &[
    "constraint",
    "duplicate",
    "already exists",
    "violates",
    "out of range",
    "invalid date",
    "type mismatch",
    "invalid input syntax",
];

/// A failed tool call, diagnosed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub tool_name: String,
    pub input_summary: Value,
    pub suggested_action: String,
}

impl ClassifiedError {
    /// Renders the report shape the learning pipeline consumes:
    /// `{kind, message, details: {tool_name, input_summary, suggested_action}}`.
    pub fn to_report(&self) -> Value {
        serde_json::json!({
            "kind": self.kind,
            "message": self.message,
            "details": {
                "tool_name": self.tool_name,
                "input_summary": self.input_summary,
                "suggested_action": self.suggested_action,
            }
        })
    }
}

/// Classifies a failure message into an [`ErrorKind`].
pub fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();

    if is_misuse(&lower) {
        ErrorKind::ToolMisuse
    } else if CONTEXT_PATTERNS.iter().any(|p| lower.contains(p)) {
        ErrorKind::ContextMissing
    } else if FACTUAL_PATTERNS.iter().any(|p| lower.contains(p)) {
        ErrorKind::FactualError
    } else {
        ErrorKind::ReasoningError
    }
}

fn is_misuse(lower: &str) -> bool {
    if MISUSE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }
    // Postgres "invalid input syntax for type ..." is a data-layer mismatch.
    if lower.contains("invalid input") && !lower.contains("invalid input syntax") {
        return true;
    }
    lower.contains("expected") && lower.contains("got")
}

/// Classifies a failed tool call.
pub fn classify(tool_name: &str, input: &Map<String, Value>, message: &str) -> ClassifiedError {
    let kind = classify_message(message);
    ClassifiedError {
        kind,
        message: message.to_string(),
        tool_name: tool_name.to_string(),
        input_summary: summarize_input(input),
        suggested_action: suggested_action(kind, tool_name),
    }
}

fn suggested_action(kind: ErrorKind, tool_name: &str) -> String {
    match kind {
        ErrorKind::ToolMisuse => {
            let category = ToolRegistry::global()
                .get(tool_name)
                .map(|m| m.category.as_str())
                .unwrap_or("unknown");
            format!(
                "Review the parameters for '{}' (category: {}) against its description before calling it again.",
                tool_name, category
            )
        }
        ErrorKind::ContextMissing => format!(
            "Verify the referenced entity exists and the current user has access to it before calling '{}'.",
            tool_name
        ),
        ErrorKind::FactualError => format!(
            "Validate data assumptions against existing records before calling '{}' again.",
            tool_name
        ),
        ErrorKind::ReasoningError => format!(
            "Review the reasoning chain that led to calling '{}' with this input.",
            tool_name
        ),
    }
}

/// Bounds the size of an input map for storage alongside a diagnosis.
pub fn summarize_input(input: &Map<String, Value>) -> Value {
    Value::Object(
        input
            .iter()
            .map(|(k, v)| (k.clone(), summarize_value(v)))
            .collect(),
    )
}

fn summarize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(truncate_chars(s, SUMMARY_MAX_CHARS)),
        Value::Array(items) => Value::Array(items.iter().map(summarize_value).collect()),
        Value::Object(map) => summarize_input(map),
        other => other.clone(),
    }
}

/// Cuts `s` to `max` characters plus an ellipsis when longer.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty() -> Map<String, Value> {
        Map::new()
    }

    #[test]
    fn not_found_is_context_missing() {
        assert_eq!(classify("x", &empty(), "Resource not found").kind, ErrorKind::ContextMissing);
    }

    #[test]
    fn duplicate_key_is_factual() {
        let err = classify("x", &empty(), "duplicate key violates unique constraint");
        assert_eq!(err.kind, ErrorKind::FactualError);
    }

    #[test]
    fn missing_parameter_is_misuse() {
        let err = classify("x", &empty(), "missing required parameter: foo");
        assert_eq!(err.kind, ErrorKind::ToolMisuse);
    }

    #[test]
    fn timeout_is_reasoning() {
        let err = classify("x", &empty(), "connection timed out");
        assert_eq!(err.kind, ErrorKind::ReasoningError);
    }

    #[test]
    fn dispatcher_messages_are_misuse() {
        assert_eq!(classify_message("Unknown tool: foo"), ErrorKind::ToolMisuse);
        assert_eq!(
            classify_message("Tool 'x' is registered (category: analytics) but its handler is not yet implemented."),
            ErrorKind::ToolMisuse
        );
    }

    #[test]
    fn type_mismatch_from_model_is_misuse() {
        assert_eq!(
            classify_message("Invalid parameter 'amount': expected number, got string"),
            ErrorKind::ToolMisuse
        );
        assert_eq!(classify_message("Expected array but got object"), ErrorKind::ToolMisuse);
    }

    #[test]
    fn postgres_syntax_error_is_factual() {
        assert_eq!(
            classify_message("invalid input syntax for type uuid: \"abc\""),
            ErrorKind::FactualError
        );
    }

    #[test]
    fn misuse_outranks_context() {
        assert_eq!(
            classify_message("Unknown tool 'find_lease': handler not found"),
            ErrorKind::ToolMisuse
        );
    }

    #[test]
    fn context_outranks_factual() {
        assert_eq!(
            classify_message("Tenancy not found; foreign key constraint skipped"),
            ErrorKind::ContextMissing
        );
    }

    #[test]
    fn access_denied_is_context_missing() {
        assert_eq!(classify_message("Access denied to property"), ErrorKind::ContextMissing);
        assert_eq!(classify_message("PERMISSION DENIED"), ErrorKind::ContextMissing);
    }

    #[test]
    fn empty_message_is_reasoning() {
        assert_eq!(classify_message(""), ErrorKind::ReasoningError);
    }

    #[test]
    fn misuse_action_names_category() {
        let err = classify("record_payment", &empty(), "missing required parameter: amount");
        assert!(err.suggested_action.contains("category: payment"));

        let err = classify("made_up", &empty(), "Unknown tool: made_up");
        assert!(err.suggested_action.contains("category: unknown"));
    }

    #[test]
    fn long_strings_are_truncated_in_summary() {
        let long = "a".repeat(250);
        let input = json!({"notes": long, "amount": 1200, "nested": {"body": "b".repeat(101)}, "short": "ok"});
        let err = classify("x", input.as_object().unwrap(), "boom");

        let notes = err.input_summary["notes"].as_str().unwrap();
        assert_eq!(notes.len(), 103);
        assert!(notes.ends_with("..."));
        assert_eq!(err.input_summary["amount"], 1200);
        assert_eq!(err.input_summary["short"], "ok");
        assert!(err.input_summary["nested"]["body"].as_str().unwrap().ends_with("..."));
    }

    #[test]
    fn exactly_max_chars_is_kept() {
        let s = "x".repeat(SUMMARY_MAX_CHARS);
        assert_eq!(truncate_chars(&s, SUMMARY_MAX_CHARS), s);
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let s = "é".repeat(150);
        let out = truncate_chars(&s, SUMMARY_MAX_CHARS);
        assert_eq!(out.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[test]
    fn report_has_details_block() {
        let report = classify("get_tenancy", &empty(), "Tenancy not found").to_report();
        assert_eq!(report["kind"], "CONTEXT_MISSING");
        assert_eq!(report["details"]["tool_name"], "get_tenancy");
        assert!(report["details"]["suggested_action"].is_string());
        assert!(report["details"]["input_summary"].is_object());
    }
}
