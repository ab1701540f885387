//! Memory tools - `remember_preference`, `recall_preferences`, `search_precedent`.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::SemanticMemory;
use crate::domain::foundation::DomainError;
use crate::domain::memory::{Confidence, PreferenceSource, RememberPreference};
use crate::domain::tools::{ParamError, ToolCall, ToolResult};
use crate::ports::{ToolHandler, ToolHandlerError};

/// Handler for `remember_preference`.
pub struct RememberPreferenceHandler {
    memory: Arc<SemanticMemory>,
}

impl RememberPreferenceHandler {
    pub fn new(memory: Arc<SemanticMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl ToolHandler for RememberPreferenceHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let category = call.require_str("category")?.to_string();
        let key = call.require_str("key")?.to_string();
        let value = call
            .input()
            .get("value")
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| ParamError::Missing("value".to_string()))?;

        let source = match call.optional_str("source")? {
            None => PreferenceSource::Explicit,
            Some(s) => PreferenceSource::parse(s).ok_or_else(|| ParamError::WrongType {
                name: "source".to_string(),
                expected: "'explicit' or 'inferred'",
                got: "string",
            })?,
        };
        let confidence = match call.optional_f64("confidence")? {
            None => Confidence::CERTAIN,
            Some(c) => Confidence::new(c as f32).map_err(DomainError::from)?,
        };

        let request = RememberPreference {
            scope_id: call.optional_str("scope_id")?.map(String::from),
            category,
            key,
            value,
            source,
            confidence,
        };

        let stored = self.memory.remember(call.actor_id(), request).await?;

        Ok(ToolResult::success(json!({
            "remembered": stored,
            "embedded": stored.embedding.is_some(),
        })))
    }
}

/// Handler for `recall_preferences`.
pub struct RecallPreferencesHandler {
    memory: Arc<SemanticMemory>,
}

impl RecallPreferencesHandler {
    pub fn new(memory: Arc<SemanticMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl ToolHandler for RecallPreferencesHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let query = call.optional_str("query")?;
        let category = call.optional_str("category")?;

        let results = self.memory.recall(call.actor_id(), query, category).await?;

        Ok(ToolResult::success(json!({
            "search_mode": results.mode,
            "count": results.len(),
            "preferences": results.items,
        })))
    }
}

/// Handler for `search_precedent`.
pub struct SearchPrecedentHandler {
    memory: Arc<SemanticMemory>,
}

impl SearchPrecedentHandler {
    pub fn new(memory: Arc<SemanticMemory>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl ToolHandler for SearchPrecedentHandler {
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
        let query = call.optional_str("query")?;
        let tool_name = call.optional_str("tool_name")?;

        let results = self
            .memory
            .search_precedent(call.actor_id(), query, tool_name)
            .await?;

        Ok(ToolResult::success(json!({
            "search_mode": results.mode,
            "count": results.len(),
            "decisions": results.items,
        })))
    }
}
