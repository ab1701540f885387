//! Tools HTTP adapter - REST API over the tool dispatcher.
//!
//! Provides endpoints for:
//! - Listing the tool catalogue
//! - Executing a tool as the authenticated actor
//! - Liveness

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{health, ToolsAppState};
pub use routes::tools_router;
