//! Tool dispatch.

mod dispatcher;

pub use dispatcher::{DispatchOutcome, ToolDispatcher};
