//! Stored memory records: preferences and decisions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::Embedding;
use crate::domain::foundation::{
    ActorId, DecisionId, OwnedByActor, PreferenceId, Timestamp, ValidationError,
};

/// Confidence score in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Confidence(f32);

impl Confidence {
    /// Full confidence, used for explicitly stated preferences.
    pub const CERTAIN: Confidence = Confidence(1.0);

    /// Creates a confidence, rejecting values outside `[0, 1]`.
    pub fn new(value: f32) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range(
                "confidence",
                0.0,
                1.0,
                f64::from(value),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f32 {
    fn from(c: Confidence) -> f32 {
        c.0
    }
}

/// Where a preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceSource {
    /// The user said so.
    Explicit,
    /// The agent inferred it from behaviour.
    Inferred,
}

impl PreferenceSource {
    /// Parses the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "explicit" => Some(PreferenceSource::Explicit),
            "inferred" => Some(PreferenceSource::Inferred),
            _ => None,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceSource::Explicit => "explicit",
            PreferenceSource::Inferred => "inferred",
        }
    }
}

impl fmt::Display for PreferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A remembered user preference.
///
/// Unique per `(actor_id, scope_id, category, key)`; later writes replace
/// the value and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPreference {
    pub id: PreferenceId,
    pub actor_id: ActorId,
    /// Optional narrower scope, e.g. a property id.
    pub scope_id: Option<String>,
    pub category: String,
    pub key: String,
    pub value: Value,
    #[serde(skip)]
    pub embedding: Option<Embedding>,
    pub source: PreferenceSource,
    pub confidence: Confidence,
    pub updated_at: Timestamp,
}

impl AgentPreference {
    /// Text the preference is embedded from.
    pub fn embedding_text(category: &str, key: &str, value: &Value) -> String {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        format!("{}: {} = {}", category, key, value)
    }

    /// Returns true if `other` addresses the same upsert key.
    pub fn same_key(&self, other: &AgentPreference) -> bool {
        self.actor_id == other.actor_id
            && self.scope_id == other.scope_id
            && self.category == other.category
            && self.key == other.key
    }
}

impl OwnedByActor for AgentPreference {
    fn owner_id(&self) -> &ActorId {
        &self.actor_id
    }
}

/// A request to remember a preference.
#[derive(Debug, Clone, PartialEq)]
pub struct RememberPreference {
    pub scope_id: Option<String>,
    pub category: String,
    pub key: String,
    pub value: Value,
    pub source: PreferenceSource,
    pub confidence: Confidence,
}

/// A past agent decision, logged by the learning pipeline.
///
/// Append-only; memory only reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDecision {
    pub id: DecisionId,
    pub actor_id: ActorId,
    pub tool_name: String,
    pub input: Value,
    pub output: Value,
    pub reasoning: Option<String>,
    pub confidence: Option<Confidence>,
    #[serde(skip)]
    pub embedding: Option<Embedding>,
    pub was_auto_executed: bool,
    pub created_at: Timestamp,
}

impl OwnedByActor for AgentDecision {
    fn owner_id(&self) -> &ActorId {
        &self.actor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confidence_rejects_out_of_range() {
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(f32::NAN).is_err());
        assert_eq!(Confidence::new(0.5).unwrap().value(), 0.5);
    }

    #[test]
    fn confidence_deserialization_validates() {
        assert!(serde_json::from_str::<Confidence>("0.7").is_ok());
        assert!(serde_json::from_str::<Confidence>("3.0").is_err());
    }

    #[test]
    fn embedding_text_unquotes_strings() {
        assert_eq!(
            AgentPreference::embedding_text("maintenance", "preferred_plumber", &json!("Acme")),
            "maintenance: preferred_plumber = Acme"
        );
        assert_eq!(
            AgentPreference::embedding_text("payment", "max_auto_approve", &json!(500)),
            "payment: max_auto_approve = 500"
        );
    }

    #[test]
    fn source_parses_wire_names() {
        assert_eq!(PreferenceSource::parse("inferred"), Some(PreferenceSource::Inferred));
        assert_eq!(PreferenceSource::parse("guessed"), None);
    }
}
