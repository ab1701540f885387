//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `tools` - Tool catalogue, registry, call and result types
//! - `learning` - Error taxonomy and the failure classifier
//! - `email` - Email context allowlist, sender policies, personas
//! - `memory` - Embeddings, preferences, decisions, ranked results
//! - `workflow` - Workflow plans, approval gates, arrears ladder

pub mod email;
pub mod foundation;
pub mod learning;
pub mod memory;
pub mod tools;
pub mod workflow;
