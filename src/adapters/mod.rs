//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT actor validation
//! - `email` - Resend provider and a recording mock
//! - `embedding` - Workers AI embedding backend
//! - `http` - Axum router for the tool endpoints
//! - `learning` - Learning sinks for classified errors
//! - `memory` - In-memory stores for tests and database-free runs
//! - `notifications` - Webhook and log notification dispatchers
//! - `postgres` - PostgreSQL (pgvector) stores and readers

pub mod auth;
pub mod email;
pub mod embedding;
pub mod http;
pub mod learning;
pub mod memory;
pub mod notifications;
pub mod postgres;
