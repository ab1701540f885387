//! Tool category - the business area a tool belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Business area a tool operates on.
///
/// Categories appear in "registered but not implemented" failures so the
/// model can tell a disabled capability from a hallucinated one, and they
/// drive the classifier's suggested action for misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Property,
    Tenancy,
    Tenant,
    Payment,
    Maintenance,
    Trade,
    Inspection,
    Document,
    Listing,
    Compliance,
    Communication,
    Memory,
    Workflow,
    Analytics,
}

impl ToolCategory {
    /// Returns all categories in catalogue order.
    pub fn all() -> &'static [ToolCategory] {
        &[
            ToolCategory::Property,
            ToolCategory::Tenancy,
            ToolCategory::Tenant,
            ToolCategory::Payment,
            ToolCategory::Maintenance,
            ToolCategory::Trade,
            ToolCategory::Inspection,
            ToolCategory::Document,
            ToolCategory::Listing,
            ToolCategory::Compliance,
            ToolCategory::Communication,
            ToolCategory::Memory,
            ToolCategory::Workflow,
            ToolCategory::Analytics,
        ]
    }

    /// Returns the snake_case name used in messages and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Property => "property",
            ToolCategory::Tenancy => "tenancy",
            ToolCategory::Tenant => "tenant",
            ToolCategory::Payment => "payment",
            ToolCategory::Maintenance => "maintenance",
            ToolCategory::Trade => "trade",
            ToolCategory::Inspection => "inspection",
            ToolCategory::Document => "document",
            ToolCategory::Listing => "listing",
            ToolCategory::Compliance => "compliance",
            ToolCategory::Communication => "communication",
            ToolCategory::Memory => "memory",
            ToolCategory::Workflow => "workflow",
            ToolCategory::Analytics => "analytics",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
