//! Mock learning sink for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::learning::ClassifiedError;
use crate::ports::LearningSink;

/// Records every report; clones share the record.
#[derive(Debug, Clone, Default)]
pub struct MockLearningSink {
    recorded: Arc<Mutex<Vec<(ActorId, ClassifiedError)>>>,
}

impl MockLearningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<(ActorId, ClassifiedError)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl LearningSink for MockLearningSink {
    async fn record(&self, actor_id: &ActorId, error: ClassifiedError) -> Result<(), DomainError> {
        self.recorded.lock().unwrap().push((actor_id.clone(), error));
        Ok(())
    }
}
