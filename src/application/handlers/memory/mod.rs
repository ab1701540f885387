//! Semantic memory handlers.

mod embedding_service;
mod memory_tools;
mod semantic_memory;

pub use embedding_service::EmbeddingService;
pub use memory_tools::{RecallPreferencesHandler, RememberPreferenceHandler, SearchPrecedentHandler};
pub use semantic_memory::SemanticMemory;
