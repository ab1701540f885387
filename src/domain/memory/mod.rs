//! Semantic memory - preferences and decision precedent.
//!
//! Memory is an accelerant, not a dependency: when embeddings are
//! unavailable, searches fall back to deterministic listings and say so.

mod embedding;
mod records;
mod search;

pub use embedding::{similarity, Embedding};
pub use records::{
    AgentDecision, AgentPreference, Confidence, PreferenceSource, RememberPreference,
};
pub use search::{rank_by_similarity, MemoryLimits, MemoryResults, Scored, SearchMode};
