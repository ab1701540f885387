//! In-memory decision log.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::memory::{rank_by_similarity, AgentDecision, Embedding, Scored};
use crate::ports::DecisionReader;

/// Append-only decision log held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionLog {
    decisions: Arc<RwLock<Vec<AgentDecision>>>,
}

impl InMemoryDecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decision, as the learning pipeline would.
    pub async fn append(&self, decision: AgentDecision) {
        self.decisions.write().await.push(decision);
    }

    pub async fn len(&self) -> usize {
        self.decisions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.decisions.read().await.is_empty()
    }

    async fn scoped(&self, actor_id: &ActorId, tool_name: Option<&str>) -> Vec<AgentDecision> {
        self.decisions
            .read()
            .await
            .iter()
            .filter(|d| &d.actor_id == actor_id && tool_name.map_or(true, |t| d.tool_name == t))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DecisionReader for InMemoryDecisionLog {
    async fn recent(
        &self,
        actor_id: &ActorId,
        tool_name: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentDecision>, DomainError> {
        let mut decisions = self.scoped(actor_id, tool_name).await;
        // Newest first; later appends win ties.
        decisions.reverse();
        decisions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        decisions.truncate(limit);
        Ok(decisions)
    }

    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        tool_name: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentDecision>>, DomainError> {
        let decisions = self.scoped(actor_id, tool_name).await;
        Ok(rank_by_similarity(
            query,
            decisions,
            |d| d.embedding.as_ref(),
            threshold,
            limit,
        ))
    }
}
