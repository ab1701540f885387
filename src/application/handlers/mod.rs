//! Application handlers.
//!
//! The dispatcher plus one module per tool family. Each family exposes
//! `ToolHandler` implementations that the binary registers with the
//! dispatcher.

pub mod email;
pub mod memory;
pub mod notification;
pub mod property;
pub mod tools;
pub mod workflow;

pub use email::{AuthorizedEmail, EmailContextGuard, EmailRequest, SendEmailHandler};
pub use memory::{
    EmbeddingService, RecallPreferencesHandler, RememberPreferenceHandler, SearchPrecedentHandler,
    SemanticMemory,
};
pub use notification::SendNotificationHandler;
pub use property::{GetPropertyHandler, ListPropertiesHandler};
pub use tools::{DispatchOutcome, ToolDispatcher};
pub use workflow::{WorkflowOrchestrator, WorkflowToolHandler};
