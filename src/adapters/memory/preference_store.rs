//! In-memory preference store.
//!
//! Same ordering and upsert semantics as the Postgres adapter. Useful for
//! tests and for running without a database.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::memory::{rank_by_similarity, AgentPreference, Embedding, Scored};
use crate::ports::PreferenceStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    preferences: Arc<RwLock<Vec<AgentPreference>>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored preferences across all actors.
    pub async fn len(&self) -> usize {
        self.preferences.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.preferences.read().await.is_empty()
    }
}

fn in_scope(p: &AgentPreference, actor_id: &ActorId, category: Option<&str>) -> bool {
    &p.actor_id == actor_id && category.map_or(true, |c| p.category == c)
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn upsert(&self, preference: AgentPreference) -> Result<AgentPreference, DomainError> {
        let mut preferences = self.preferences.write().await;

        if let Some(existing) = preferences.iter_mut().find(|p| p.same_key(&preference)) {
            existing.value = preference.value;
            existing.embedding = preference.embedding;
            existing.source = preference.source;
            existing.confidence = preference.confidence;
            existing.updated_at = preference.updated_at;
            return Ok(existing.clone());
        }

        preferences.push(preference.clone());
        Ok(preference)
    }

    async fn list(
        &self,
        actor_id: &ActorId,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentPreference>, DomainError> {
        let preferences = self.preferences.read().await;
        let mut matching: Vec<AgentPreference> = preferences
            .iter()
            .filter(|p| in_scope(p, actor_id, category))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            b.confidence
                .value()
                .total_cmp(&a.confidence.value())
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        matching.truncate(limit);
        Ok(matching)
    }

    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        category: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentPreference>>, DomainError> {
        let preferences = self.preferences.read().await;
        let candidates: Vec<AgentPreference> = preferences
            .iter()
            .filter(|p| in_scope(p, actor_id, category))
            .cloned()
            .collect();

        Ok(rank_by_similarity(
            query,
            candidates,
            |p| p.embedding.as_ref(),
            threshold,
            limit,
        ))
    }
}
