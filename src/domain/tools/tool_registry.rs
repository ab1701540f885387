//! Tool Registry - read-only metadata for every catalogued tool.
//!
//! The registry is populated once from the catalogue at first use and is
//! never mutated afterwards. It answers "does this name exist, what category
//! is it, and is it a stub" without knowing anything about handlers.
//!
//! # Example
//!
//! ```ignore
//! use rentwise::domain::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::global();
//! let meta = registry.get("get_arrears").unwrap();
//! assert_eq!(meta.category.as_str(), "payment");
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::{ToolCategory, ToolDefinition, ToolName};

/// Static metadata for one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolMeta {
    pub name: ToolName,
    pub category: ToolCategory,
    pub is_stub: bool,
    pub description: &'static str,
}

impl ToolMeta {
    fn from_tool(tool: ToolName) -> Self {
        Self {
            name: tool,
            category: tool.category(),
            is_stub: tool.is_stub(),
            description: tool.description(),
        }
    }
}

static REGISTRY: Lazy<ToolRegistry> = Lazy::new(ToolRegistry::from_catalog);

/// Lookup table over the tool catalogue.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolMeta>,
}

impl ToolRegistry {
    /// Returns the process-wide registry.
    pub fn global() -> &'static ToolRegistry {
        &REGISTRY
    }

    fn from_catalog() -> Self {
        let tools = ToolName::ALL
            .iter()
            .map(|tool| (tool.as_str(), ToolMeta::from_tool(*tool)))
            .collect();
        Self { tools }
    }

    /// Looks up metadata by wire name.
    pub fn get(&self, name: &str) -> Option<&ToolMeta> {
        self.tools.get(name)
    }

    /// Metadata for a parsed tool name. Total over the catalogue.
    pub fn meta(&self, tool: ToolName) -> ToolMeta {
        ToolMeta::from_tool(tool)
    }

    /// Returns true if the name is catalogued.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of catalogued tools, stubs included.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if the registry has no tools.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools in a category, in catalogue order.
    pub fn by_category(&self, category: ToolCategory) -> Vec<ToolMeta> {
        ToolName::ALL
            .iter()
            .filter(|t| t.category() == category)
            .map(|t| ToolMeta::from_tool(*t))
            .collect()
    }

    /// Tools that are registered but disabled.
    pub fn stubs(&self) -> Vec<ToolMeta> {
        ToolName::ALL
            .iter()
            .filter(|t| t.is_stub())
            .map(|t| ToolMeta::from_tool(*t))
            .collect()
    }

    /// Definitions for every non-stub tool, in catalogue order.
    ///
    /// Stubs are left out so the model is never offered a tool that can
    /// only fail.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolName::ALL
            .iter()
            .filter(|t| !t.is_stub())
            .map(|t| ToolDefinition::for_tool(*t))
            .collect()
    }

    /// Model-facing tool list in Anthropic format.
    pub fn to_anthropic_tools(&self) -> Vec<serde_json::Value> {
        self.definitions()
            .iter()
            .map(ToolDefinition::to_anthropic_format)
            .collect()
    }
}
