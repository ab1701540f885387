//! ToolDispatcher - Routes a model-emitted tool call to its handler.
//!
//! `execute` is total: whatever the model sends and whatever the handler
//! does (including panicking), the caller gets exactly one [`ToolResult`].
//!
//! Resolution order:
//!
//! 1. Name not in the catalogue → `Unknown tool: <name>`
//! 2. Catalogued stub → "coming soon" failure naming the category
//! 3. Handler registered → run it; `Err` or panic becomes
//!    `Tool '<name>' execution error: <message>`
//! 4. Catalogued but no handler → "not yet implemented" failure naming the category

use futures::FutureExt;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::foundation::{ActorId, AuthenticatedActor};
use crate::domain::learning::{classify, ClassifiedError};
use crate::domain::tools::{ToolCall, ToolName, ToolRegistry, ToolResult};
use crate::ports::{LearningSink, ToolHandler};

/// Result of a dispatch plus, for failures, its diagnosis.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub result: ToolResult,
    pub diagnosis: Option<ClassifiedError>,
}

/// Closed map from catalogued tool to handler.
pub struct ToolDispatcher {
    registry: &'static ToolRegistry,
    handlers: HashMap<ToolName, Arc<dyn ToolHandler>>,
    learning_sink: Option<Arc<dyn LearningSink>>,
}

impl ToolDispatcher {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::global(),
            handlers: HashMap::new(),
            learning_sink: None,
        }
    }

    /// Registers the handler for a tool, replacing any previous one.
    pub fn register(mut self, tool: ToolName, handler: Arc<dyn ToolHandler>) -> Self {
        if tool.is_stub() {
            tracing::warn!(tool = %tool, "Ignoring handler registered for a stub tool");
            return self;
        }
        self.handlers.insert(tool, handler);
        self
    }

    /// Registers one handler for several tools.
    pub fn register_all(mut self, tools: &[ToolName], handler: Arc<dyn ToolHandler>) -> Self {
        for tool in tools {
            self = self.register(*tool, handler.clone());
        }
        self
    }

    /// Forwards classified failures from [`execute_and_classify`](Self::execute_and_classify).
    pub fn with_learning_sink(mut self, sink: Arc<dyn LearningSink>) -> Self {
        self.learning_sink = Some(sink);
        self
    }

    /// Number of tools with a handler.
    pub fn implemented_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if the tool has a handler.
    pub fn is_implemented(&self, tool: ToolName) -> bool {
        self.handlers.contains_key(&tool)
    }

    pub fn registry(&self) -> &'static ToolRegistry {
        self.registry
    }

    /// Model-facing tool list (non-stub tools, Anthropic format).
    pub fn tool_catalog(&self) -> Vec<Value> {
        self.registry.to_anthropic_tools()
    }

    /// Executes a tool as an owner.
    pub async fn execute(
        &self,
        tool_name: &str,
        input: Map<String, Value>,
        actor_id: ActorId,
    ) -> ToolResult {
        self.execute_call(&ToolCall::new(tool_name, input, actor_id))
            .await
    }

    /// Executes a tool as an authenticated actor, carrying the actor's role.
    pub async fn execute_as(
        &self,
        tool_name: &str,
        input: Map<String, Value>,
        actor: &AuthenticatedActor,
    ) -> ToolResult {
        let call = ToolCall::new(tool_name, input, actor.actor_id.clone()).with_role(actor.role);
        self.execute_call(&call).await
    }

    /// Executes a prepared call.
    pub async fn execute_call(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        let result = self.resolve_and_run(call).await;

        tracing::info!(
            tool = %call.name(),
            actor_id = %call.actor_id(),
            role = %call.role(),
            outcome = if result.is_success() { "success" } else { "failure" },
            duration_ms = started.elapsed().as_millis() as u64,
            "Tool call completed"
        );

        result
    }

    /// Executes a call and diagnoses any failure.
    ///
    /// The diagnosis is also sent to the learning sink, if one is set, on a
    /// detached task; sink failures are logged and dropped.
    pub async fn execute_and_classify(&self, call: &ToolCall) -> DispatchOutcome {
        let result = self.execute_call(call).await;

        let diagnosis = result
            .message()
            .map(|message| classify(call.name(), call.input(), message));

        if let (Some(diagnosis), Some(sink)) = (&diagnosis, &self.learning_sink) {
            let sink = sink.clone();
            let actor_id = call.actor_id().clone();
            let diagnosis = diagnosis.clone();
            tokio::spawn(async move {
                let kind = diagnosis.kind;
                if let Err(e) = sink.record(&actor_id, diagnosis).await {
                    tracing::warn!(actor_id = %actor_id, kind = ?kind, error = %e, "Learning sink rejected diagnosis");
                }
            });
        }

        DispatchOutcome { result, diagnosis }
    }

    async fn resolve_and_run(&self, call: &ToolCall) -> ToolResult {
        let tool: ToolName = match call.name().parse() {
            Ok(tool) => tool,
            Err(e) => {
                tracing::debug!(tool = %call.name(), "Model requested an unknown tool");
                return ToolResult::failure(e.to_string());
            }
        };

        let meta = self.registry.meta(tool);
        if meta.is_stub {
            return ToolResult::failure(format!(
                "Tool '{}' is registered (category: {}) but is coming soon and cannot be executed yet.",
                tool, meta.category
            ));
        }

        let Some(handler) = self.handlers.get(&tool) else {
            return ToolResult::failure(format!(
                "Tool '{}' is registered (category: {}) but its handler is not yet implemented.",
                tool, meta.category
            ));
        };

        match AssertUnwindSafe(handler.handle(call)).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::warn!(tool = %tool, actor_id = %call.actor_id(), error = %e, "Tool handler failed");
                ToolResult::failure(format!("Tool '{}' execution error: {}", tool, e))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(tool = %tool, actor_id = %call.actor_id(), panic = %message, "Tool handler panicked");
                ToolResult::failure(format!("Tool '{}' execution error: {}", tool, message))
            }
        }
    }
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
