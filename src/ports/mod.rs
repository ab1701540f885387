//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Tool Execution
//!
//! - `ToolHandler` - One implementation per tool name
//! - `LearningSink` - Consumer of classified tool failures
//!
//! ## Memory
//!
//! - `EmbeddingBackend` - Text embedding model (optional capability)
//! - `PreferenceStore` / `DecisionReader` - Preference and decision persistence
//!
//! ## Guardrails and Workflows
//!
//! - `RecipientDirectory` - Relationship checks for outbound email
//! - `WorkflowStateReader` - Ownership-scoped workflow state
//! - `PropertyReader` - Ownership-scoped property lookups
//!
//! ## Delivery
//!
//! - `EmailProvider` - Outbound email
//! - `NotificationDispatcher` - Best-effort push delivery
//!
//! ## Auth
//!
//! - `ActorValidator` - Bearer token validation

mod actor_validator;
mod email_provider;
mod embedding_backend;
mod learning_sink;
mod memory_store;
mod notification_dispatcher;
mod property_reader;
mod recipient_directory;
mod tool_handler;
mod workflow_state_reader;

pub use actor_validator::ActorValidator;
pub use email_provider::{EmailProvider, OutboundEmail, SentEmail};
pub use embedding_backend::{EmbeddingBackend, EmbeddingError, EmbeddingOptions};
pub use learning_sink::LearningSink;
pub use memory_store::{DecisionReader, PreferenceStore};
pub use notification_dispatcher::{Notification, NotificationDispatcher};
pub use property_reader::PropertyReader;
pub use recipient_directory::RecipientDirectory;
pub use tool_handler::{ToolHandler, ToolHandlerError};
pub use workflow_state_reader::WorkflowStateReader;
