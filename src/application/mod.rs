//! Application layer - Tool handlers and the dispatcher that routes to them.
//!
//! Handlers orchestrate domain logic and coordinate between ports. They
//! never talk to a database or HTTP API directly.

pub mod handlers;
mod notifications;

pub use handlers::{
    DispatchOutcome, EmailContextGuard, EmbeddingService, SemanticMemory, ToolDispatcher,
    WorkflowOrchestrator,
};
pub use notifications::spawn_notification;
