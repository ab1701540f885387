//! Tool Handler Port - Interface for the implementation behind one tool name.
//!
//! Handlers are the thin units of work the dispatcher routes to. They receive
//! the whole [`ToolCall`] (input map, actor, role) and produce exactly one
//! [`ToolResult`]. Anything they cannot express as a `Failure` result is
//! returned as a [`ToolHandlerError`]; the dispatcher turns that into a
//! failure too, so nothing escapes to the model.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct GetPropertyHandler { /* ... */ }
//!
//! #[async_trait]
//! impl ToolHandler for GetPropertyHandler {
//!     async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError> {
//!         let property_id = call.require_str("property_id")?;
//!         // fetch scoped to call.actor_id() ...
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::email::EmailGuardError;
use crate::domain::foundation::DomainError;
use crate::domain::tools::{ParamError, ToolCall, ToolResult};

/// Port for one tool implementation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Executes the call.
    ///
    /// Returning `Ok(ToolResult::Failure)` and `Err(_)` both end as a failure
    /// for the model; use `Err` for anything unexpected.
    async fn handle(&self, call: &ToolCall) -> Result<ToolResult, ToolHandlerError>;
}

/// Errors a handler can raise.
#[derive(Debug, Clone, Error)]
pub enum ToolHandlerError {
    #[error(transparent)]
    InvalidParams(#[from] ParamError),

    #[error("{}", .0.message)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    EmailRejected(#[from] EmailGuardError),

    #[error("{0}")]
    Internal(String),
}

impl ToolHandlerError {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
