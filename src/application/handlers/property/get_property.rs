//! Property lookups, always scoped to the acting owner.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::tools::{ToolCall, ToolResult};
use crate::ports::{PropertyReader, ToolHandler, ToolHandlerError};

pub struct GetPropertyHandler {
    reader: Arc<dyn PropertyReader>,
}

impl GetPropertyHandler {
    pub fn new(reader: Arc<dyn PropertyReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl ToolHandler for GetPropertyHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let property_id = call.require_str("property_id")?;

        let property = self
            .reader
            .get_property(call.actor_id(), property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;

        Ok(ToolResult::success(json!({ "property": property })))
    }
}

pub struct ListPropertiesHandler {
    reader: Arc<dyn PropertyReader>,
}

impl ListPropertiesHandler {
    pub fn new(reader: Arc<dyn PropertyReader>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl ToolHandler for ListPropertiesHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let properties = self.reader.list_properties(call.actor_id()).await?;

        Ok(ToolResult::success(json!({
            "count": properties.len(),
            "properties": properties,
        })))
    }
}
