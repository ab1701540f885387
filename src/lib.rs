//! Rentwise - Tool execution and guardrails for a property-management assistant.
//!
//! The model emits tool calls; this crate routes them to handlers, keeps
//! every result inside the acting owner's data, guards outbound email,
//! remembers owner preferences, and turns multi-step processes into guided
//! plans.
//!
//! Layout follows ports and adapters:
//! - `domain` - Tool catalogue, error classification, email contexts, memory, workflows
//! - `ports` - Traits for every external capability
//! - `application` - Dispatcher and tool handlers
//! - `adapters` - Postgres, HTTP, email, embedding, notification implementations
//! - `config` - Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
