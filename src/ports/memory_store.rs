//! Memory Store Ports - Preference and decision persistence.
//!
//! Every query is scoped to the requesting actor. Similarity searches take an
//! already-computed query embedding; the memory service owns embedding and
//! fallback policy, stores only filter and rank.

use async_trait::async_trait;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::memory::{AgentDecision, AgentPreference, Embedding, Scored};

/// Port for reading and upserting remembered preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Inserts or replaces the preference keyed by
    /// `(actor_id, scope_id, category, key)` and returns the stored row.
    ///
    /// Last write wins: value, embedding, source and confidence are replaced.
    async fn upsert(&self, preference: AgentPreference) -> Result<AgentPreference, DomainError>;

    /// Lists an actor's preferences, optionally for one category.
    ///
    /// Ordered by confidence descending, then most recently updated.
    async fn list(
        &self,
        actor_id: &ActorId,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentPreference>, DomainError>;

    /// Preferences with an embedding whose similarity to `query` is at least
    /// `threshold`, best first.
    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        category: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentPreference>>, DomainError>;
}

/// Port for reading the append-only decision log.
#[async_trait]
pub trait DecisionReader: Send + Sync {
    /// Most recent decisions first, optionally for one tool.
    async fn recent(
        &self,
        actor_id: &ActorId,
        tool_name: Option<&str>,
        limit: usize,
    ) -> Result<Vec<AgentDecision>, DomainError>;

    /// Decisions whose similarity to `query` is at least `threshold`, best first.
    async fn search_similar(
        &self,
        actor_id: &ActorId,
        query: &Embedding,
        tool_name: Option<&str>,
        threshold: f32,
        limit: usize,
    ) -> Result<Vec<Scored<AgentDecision>>, DomainError>;
}
