//! Learning sink adapters.

mod mock;
mod tracing_sink;

pub use mock::MockLearningSink;
pub use tracing_sink::TracingLearningSink;
