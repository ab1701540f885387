//! SemanticMemory - Preference recall and decision precedent with fallback.
//!
//! Every search reports the [`SearchMode`] that actually produced its
//! results. The semantic path is attempted only when a non-blank query is
//! given and semantic memory is enabled; any embedding failure, store
//! similarity failure, or empty hit list drops to the deterministic path:
//!
//! - `recall` → category listing ordered by confidence
//! - `search_precedent` → newest-first listing, optionally for one tool

use std::sync::Arc;

use super::EmbeddingService;
use crate::domain::foundation::{ActorId, DomainError, PreferenceId, Timestamp};
use crate::domain::memory::{
    AgentDecision, AgentPreference, Embedding, MemoryLimits, MemoryResults, RememberPreference,
    Scored, SearchMode,
};
use crate::ports::{DecisionReader, PreferenceStore};

pub struct SemanticMemory {
    embeddings: Arc<EmbeddingService>,
    preferences: Arc<dyn PreferenceStore>,
    decisions: Arc<dyn DecisionReader>,
    limits: MemoryLimits,
    semantic_enabled: bool,
}

impl SemanticMemory {
    pub fn new(
        embeddings: Arc<EmbeddingService>,
        preferences: Arc<dyn PreferenceStore>,
        decisions: Arc<dyn DecisionReader>,
        limits: MemoryLimits,
    ) -> Self {
        Self {
            embeddings,
            preferences,
            decisions,
            limits,
            semantic_enabled: true,
        }
    }

    /// Turns the semantic path off; searches always use fallbacks.
    pub fn with_semantic_enabled(mut self, enabled: bool) -> Self {
        self.semantic_enabled = enabled;
        self
    }

    pub fn limits(&self) -> &MemoryLimits {
        &self.limits
    }

    /// Upserts a preference. The embedding is best-effort: if it cannot be
    /// computed the preference is stored without one.
    pub async fn remember(
        &self,
        actor_id: &ActorId,
        request: RememberPreference,
    ) -> Result<AgentPreference, DomainError> {
        let text = AgentPreference::embedding_text(&request.category, &request.key, &request.value);
        let embedding = if self.semantic_enabled {
            self.try_embed(&text).await
        } else {
            None
        };

        let preference = AgentPreference {
            id: PreferenceId::new(),
            actor_id: actor_id.clone(),
            scope_id: request.scope_id,
            category: request.category,
            key: request.key,
            value: request.value,
            embedding,
            source: request.source,
            confidence: request.confidence,
            updated_at: Timestamp::now(),
        };

        let stored = self.preferences.upsert(preference).await?;
        tracing::debug!(
            actor_id = %actor_id,
            category = %stored.category,
            key = %stored.key,
            embedded = stored.embedding.is_some(),
            "Preference remembered"
        );
        Ok(stored)
    }

    /// Recalls preferences relevant to `query`, or lists by category.
    pub async fn recall(
        &self,
        actor_id: &ActorId,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<MemoryResults<AgentPreference>, DomainError> {
        if let Some(embedding) = self.query_embedding(query).await {
            match self
                .preferences
                .search_similar(
                    actor_id,
                    &embedding,
                    category,
                    self.limits.similarity_threshold,
                    self.limits.recall_limit,
                )
                .await
            {
                Ok(items) if !items.is_empty() => {
                    return Ok(MemoryResults {
                        mode: SearchMode::Semantic,
                        items,
                    })
                }
                Ok(_) => tracing::debug!(actor_id = %actor_id, "No semantic preference hits"),
                Err(e) => {
                    tracing::warn!(actor_id = %actor_id, error = %e, "Preference similarity search failed")
                }
            }
        }

        let items = self
            .preferences
            .list(actor_id, category, self.limits.fallback_limit)
            .await?;

        tracing::debug!(actor_id = %actor_id, mode = ?SearchMode::CategoryFallback, count = items.len(), "Preferences recalled");
        Ok(MemoryResults {
            mode: SearchMode::CategoryFallback,
            items: items.into_iter().map(Scored::unranked).collect(),
        })
    }

    /// Finds past decisions similar to `query`, or the most recent ones.
    pub async fn search_precedent(
        &self,
        actor_id: &ActorId,
        query: Option<&str>,
        tool_name: Option<&str>,
    ) -> Result<MemoryResults<AgentDecision>, DomainError> {
        if let Some(embedding) = self.query_embedding(query).await {
            match self
                .decisions
                .search_similar(
                    actor_id,
                    &embedding,
                    tool_name,
                    self.limits.similarity_threshold,
                    self.limits.precedent_limit,
                )
                .await
            {
                Ok(items) if !items.is_empty() => {
                    return Ok(MemoryResults {
                        mode: SearchMode::Semantic,
                        items,
                    })
                }
                Ok(_) => tracing::debug!(actor_id = %actor_id, "No semantic precedent hits"),
                Err(e) => {
                    tracing::warn!(actor_id = %actor_id, error = %e, "Decision similarity search failed")
                }
            }
        }

        let items = self
            .decisions
            .recent(actor_id, tool_name, self.limits.fallback_limit)
            .await?;

        tracing::debug!(actor_id = %actor_id, mode = ?SearchMode::RecencyFallback, count = items.len(), "Precedent listed");
        Ok(MemoryResults {
            mode: SearchMode::RecencyFallback,
            items: items.into_iter().map(Scored::unranked).collect(),
        })
    }

    async fn query_embedding(&self, query: Option<&str>) -> Option<Embedding> {
        if !self.semantic_enabled {
            return None;
        }
        let query = query.map(str::trim).filter(|q| !q.is_empty())?;
        self.try_embed(query).await
    }

    async fn try_embed(&self, text: &str) -> Option<Embedding> {
        match self.embeddings.embed(text).await {
            Ok(embedding) if !embedding.is_zero() => Some(embedding),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Embedding unavailable, continuing without it");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::embedding::MockEmbeddingBackend;
    use crate::adapters::memory::{InMemoryDecisionLog, InMemoryPreferenceStore};
    use crate::domain::foundation::DecisionId;
    use crate::domain::memory::{Confidence, PreferenceSource};
    use serde_json::json;

    const DIMS: usize = 128;

    fn actor(id: &str) -> ActorId {
        ActorId::new(id).unwrap()
    }

    fn request(category: &str, key: &str, value: &str, confidence: f32) -> RememberPreference {
        RememberPreference {
            scope_id: None,
            category: category.to_string(),
            key: key.to_string(),
            value: json!(value),
            source: PreferenceSource::Explicit,
            confidence: Confidence::new(confidence).unwrap(),
        }
    }

    struct Fixture {
        memory: SemanticMemory,
        preferences: Arc<InMemoryPreferenceStore>,
        decisions: Arc<InMemoryDecisionLog>,
    }

    fn fixture(backend: MockEmbeddingBackend) -> Fixture {
        let embeddings = Arc::new(EmbeddingService::new(Arc::new(backend), DIMS, 500));
        let preferences = Arc::new(InMemoryPreferenceStore::new());
        let decisions = Arc::new(InMemoryDecisionLog::new());
        let memory = SemanticMemory::new(
            embeddings,
            preferences.clone(),
            decisions.clone(),
            MemoryLimits::default(),
        );
        Fixture {
            memory,
            preferences,
            decisions,
        }
    }

    #[tokio::test]
    async fn remember_stores_embedding_when_available() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));

        let stored = f
            .memory
            .remember(&actor("owner-1"), request("communication", "tone", "formal", 0.9))
            .await
            .unwrap();

        assert!(stored.embedding.is_some());
    }

    #[tokio::test]
    async fn remember_succeeds_when_embedding_fails() {
        let f = fixture(MockEmbeddingBackend::failing(DIMS));

        let stored = f
            .memory
            .remember(&actor("owner-1"), request("communication", "tone", "formal", 0.9))
            .await
            .unwrap();

        assert!(stored.embedding.is_none());
        assert_eq!(f.preferences.len().await, 1);
    }

    #[tokio::test]
    async fn remember_upserts_same_key() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));
        let owner = actor("owner-1");

        f.memory.remember(&owner, request("trades", "plumber", "Ace", 0.5)).await.unwrap();
        f.memory.remember(&owner, request("trades", "plumber", "Best", 0.8)).await.unwrap();

        let results = f.memory.recall(&owner, None, Some("trades")).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.items[0].item.value, json!("Best"));
    }

    #[tokio::test]
    async fn recall_with_query_is_semantic() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));
        let owner = actor("owner-1");
        f.memory
            .remember(&owner, request("trades", "preferred plumber", "Ace Plumbing", 0.9))
            .await
            .unwrap();
        f.memory
            .remember(&owner, request("reporting", "report day", "monday", 0.9))
            .await
            .unwrap();

        let results = f
            .memory
            .recall(&owner, Some("preferred plumber"), None)
            .await
            .unwrap();

        assert_eq!(results.mode, SearchMode::Semantic);
        assert_eq!(results.items[0].item.key, "preferred plumber");
        assert!(results.items[0].similarity.unwrap() >= 0.4);
    }

    #[tokio::test]
    async fn recall_falls_back_when_backend_fails() {
        let f = fixture(MockEmbeddingBackend::failing(DIMS));
        let owner = actor("owner-1");
        f.memory.remember(&owner, request("trades", "plumber", "Ace", 0.4)).await.unwrap();
        f.memory.remember(&owner, request("trades", "sparky", "Volt", 0.9)).await.unwrap();

        let results = f.memory.recall(&owner, Some("plumber"), Some("trades")).await.unwrap();

        assert_eq!(results.mode, SearchMode::CategoryFallback);
        assert_eq!(results.items[0].item.key, "sparky");
        assert!(results.items.iter().all(|s| s.similarity.is_none()));
    }

    #[tokio::test]
    async fn recall_falls_back_when_nothing_similar() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));
        let owner = actor("owner-1");
        f.memory.remember(&owner, request("trades", "plumber", "Ace", 0.9)).await.unwrap();

        let results = f
            .memory
            .recall(&owner, Some("quarterly tax filing"), None)
            .await
            .unwrap();

        assert_eq!(results.mode, SearchMode::CategoryFallback);
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn recall_is_scoped_to_actor() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));
        f.memory
            .remember(&actor("owner-a"), request("trades", "plumber", "Ace", 0.9))
            .await
            .unwrap();

        let results = f.memory.recall(&actor("owner-b"), Some("plumber"), None).await.unwrap();

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn disabled_semantic_memory_always_falls_back() {
        let f = fixture(MockEmbeddingBackend::new(DIMS));
        let memory = f.memory.with_semantic_enabled(false);
        let owner = actor("owner-1");
        memory.remember(&owner, request("trades", "plumber", "Ace", 0.9)).await.unwrap();

        let results = memory.recall(&owner, Some("plumber"), None).await.unwrap();

        assert_eq!(results.mode, SearchMode::CategoryFallback);
    }

    fn decision(actor_id: &str, tool: &str, reasoning: &str, embedding: Option<Embedding>) -> AgentDecision {
        AgentDecision {
            id: DecisionId::new(),
            actor_id: actor(actor_id),
            tool_name: tool.to_string(),
            input: json!({}),
            output: json!({}),
            reasoning: Some(reasoning.to_string()),
            confidence: None,
            embedding,
            was_auto_executed: false,
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn precedent_falls_back_to_recency() {
        let f = fixture(MockEmbeddingBackend::failing(DIMS));
        f.decisions.append(decision("owner-1", "approve_quote", "cheapest quote", None)).await;
        f.decisions.append(decision("owner-1", "assign_trade", "available today", None)).await;

        let results = f
            .memory
            .search_precedent(&actor("owner-1"), Some("quote approval"), Some("approve_quote"))
            .await
            .unwrap();

        assert_eq!(results.mode, SearchMode::RecencyFallback);
        assert_eq!(results.len(), 1);
        assert_eq!(results.items[0].item.tool_name, "approve_quote");
    }

    #[tokio::test]
    async fn precedent_with_query_is_semantic() {
        let backend = MockEmbeddingBackend::new(DIMS);
        let embeddings = EmbeddingService::new(Arc::new(backend.clone()), DIMS, 500);
        let f = fixture(backend);
        let stored = embeddings.embed("approved cheapest plumbing quote").await.unwrap();
        f.decisions.append(decision("owner-1", "approve_quote", "cheapest", Some(stored))).await;

        let results = f
            .memory
            .search_precedent(&actor("owner-1"), Some("cheapest plumbing quote"), None)
            .await
            .unwrap();

        assert_eq!(results.mode, SearchMode::Semantic);
        assert_eq!(results.len(), 1);
    }
}
