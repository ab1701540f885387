//! Search modes, ranked results, and ranking helpers.

use serde::{Deserialize, Serialize};

use super::Embedding;

/// Which search path produced a result set.
///
/// Ranking quality differs between paths, so consumers are told which one
/// ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Similarity search over embeddings.
    Semantic,
    /// Preferences filtered by category, ordered by confidence.
    CategoryFallback,
    /// Decisions ordered newest first, optionally filtered by tool.
    RecencyFallback,
}

impl SearchMode {
    /// Returns true for either non-semantic path.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, SearchMode::Semantic)
    }
}

/// An item with its similarity score, if one was computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl<T> Scored<T> {
    /// Wraps an item that was ranked by similarity.
    pub fn ranked(item: T, similarity: f32) -> Self {
        Self {
            item,
            similarity: Some(similarity),
        }
    }

    /// Wraps an item from a fallback listing.
    pub fn unranked(item: T) -> Self {
        Self {
            item,
            similarity: None,
        }
    }
}

/// Result of a recall or precedent search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryResults<T> {
    pub mode: SearchMode,
    pub items: Vec<Scored<T>>,
}

impl<T> MemoryResults<T> {
    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Tunables for memory search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryLimits {
    /// Minimum similarity for a semantic hit (inclusive).
    pub similarity_threshold: f32,
    pub recall_limit: usize,
    pub precedent_limit: usize,
    pub fallback_limit: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.4,
            recall_limit: 10,
            precedent_limit: 5,
            fallback_limit: 20,
        }
    }
}

/// Ranks items by similarity to `query`.
///
/// Items without an embedding, or scoring under `threshold`, are dropped.
/// Ties keep input order.
pub fn rank_by_similarity<T, F>(
    query: &Embedding,
    items: Vec<T>,
    embedding_of: F,
    threshold: f32,
    limit: usize,
) -> Vec<Scored<T>>
where
    F: Fn(&T) -> Option<&Embedding>,
{
    let mut scored: Vec<Scored<T>> = items
        .into_iter()
        .filter_map(|item| {
            let score = embedding_of(&item).map(|e| query.similarity(e))?;
            (score >= threshold).then(|| Scored::ranked(item, score))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(v: &[f32]) -> Embedding {
        Embedding::normalized(v.to_vec())
    }

    #[test]
    fn ranks_descending_and_applies_threshold() {
        let query = e(&[1.0, 0.0]);
        let items = vec![
            ("far", Some(e(&[0.0, 1.0]))),
            ("close", Some(e(&[1.0, 0.1]))),
            ("closer", Some(e(&[1.0, 0.0]))),
            ("none", None),
        ];

        let ranked = rank_by_similarity(&query, items, |(_, emb)| emb.as_ref(), 0.4, 10);
        let names: Vec<_> = ranked.iter().map(|s| s.item.0).collect();
        assert_eq!(names, vec!["closer", "close"]);
    }

    #[test]
    fn truncates_to_limit() {
        let query = e(&[1.0]);
        let items: Vec<Embedding> = (0..5).map(|_| e(&[1.0])).collect();
        let ranked = rank_by_similarity(&query, items, |emb| Some(emb), 0.0, 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn fallback_modes_are_flagged() {
        assert!(!SearchMode::Semantic.is_fallback());
        assert!(SearchMode::CategoryFallback.is_fallback());
        assert_eq!(
            serde_json::to_string(&SearchMode::RecencyFallback).unwrap(),
            "\"recency_fallback\""
        );
    }

    #[test]
    fn scored_flattens_item() {
        #[derive(Serialize)]
        struct Item {
            key: &'static str,
        }
        let json = serde_json::to_value(Scored::ranked(Item { key: "k" }, 0.9)).unwrap();
        assert_eq!(json["key"], "k");
        assert!(json["similarity"].is_number());

        let json = serde_json::to_value(Scored::unranked(Item { key: "k" })).unwrap();
        assert!(json.get("similarity").is_none());
    }
}
