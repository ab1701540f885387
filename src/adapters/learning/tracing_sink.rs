//! Learning sink that writes classified failures to the log.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::learning::ClassifiedError;
use crate::ports::LearningSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLearningSink;

#[async_trait]
impl LearningSink for TracingLearningSink {
    async fn record(&self, actor_id: &ActorId, error: ClassifiedError) -> Result<(), DomainError> {
        tracing::info!(
            actor_id = %actor_id,
            tool = %error.tool_name,
            kind = %error.kind,
            learning_target = error.kind.learning_target(),
            suggested_action = %error.suggested_action,
            input_summary = %error.input_summary,
            "Tool failure classified"
        );
        Ok(())
    }
}
