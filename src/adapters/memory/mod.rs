//! In-memory adapters for memory, property, recipient and workflow lookups.
//!
//! They honour the same ownership scoping as the Postgres adapters, so the
//! whole tool surface can run without a database.

mod decision_log;
mod preference_store;
mod property_reader;
mod recipient_directory;
mod workflow_state;

pub use decision_log::InMemoryDecisionLog;
pub use preference_store::InMemoryPreferenceStore;
pub use property_reader::InMemoryPropertyReader;
pub use recipient_directory::InMemoryRecipientDirectory;
pub use workflow_state::InMemoryWorkflowStateReader;
