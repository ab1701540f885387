//! Tool definition - the model-facing description of a tool.

use serde::{Deserialize, Serialize};

use super::ToolName;

/// Definition of a tool as presented to the language model.
///
/// Built from the catalogue; the parameter schema only lists the required
/// keys because individual handlers own their detailed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "get_property")
    name: String,

    /// Human-readable description for the model
    description: String,

    /// JSON Schema for the input object
    parameters_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_schema,
        }
    }

    /// Builds the definition for a catalogued tool.
    pub fn for_tool(tool: ToolName) -> Self {
        let properties: serde_json::Map<String, serde_json::Value> = tool
            .required_params()
            .iter()
            .map(|p| ((*p).to_string(), serde_json::json!({})))
            .collect();

        Self::new(
            tool.as_str(),
            tool.description(),
            serde_json::json!({
                "type": "object",
                "properties": properties,
                "required": tool.required_params(),
            }),
        )
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameters schema.
    pub fn parameters_schema(&self) -> &serde_json::Value {
        &self.parameters_schema
    }

    /// Converts to Anthropic tool format.
    pub fn to_anthropic_format(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.parameters_schema
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_tool_lists_required_params() {
        let def = ToolDefinition::for_tool(ToolName::RecordPayment);

        assert_eq!(def.name(), "record_payment");
        let required = def.parameters_schema()["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert!(def.parameters_schema()["properties"]["amount"].is_object());
    }

    #[test]
    fn to_anthropic_format_has_correct_structure() {
        let def = ToolDefinition::for_tool(ToolName::ListProperties);
        let anthropic = def.to_anthropic_format();

        assert_eq!(anthropic["name"], "list_properties");
        assert_eq!(anthropic["input_schema"]["type"], "object");
        assert!(anthropic["input_schema"]["required"].as_array().unwrap().is_empty());
    }
}
