//! Email - the outbound correspondence allowlist and sender identities.
//!
//! - [`EmailContextType`] - closed set of legitimate email purposes
//! - [`EmailContextConfig`] - per-context sender and recipient policy
//! - [`EmailPersona`] - stable named sender for trade correspondence
//! - [`resolve_sender`] - picks the "from" identity for a context

mod context;
mod persona;
mod sender;

pub use context::{
    context_config, is_valid_context, EmailContextConfig, EmailContextType, RecipientType,
    SenderPolicy,
};
pub use persona::{fnv1a_32, persona_for, persona_index, persona_pool_size, EmailPersona};
pub use sender::{
    resolve_for_context, resolve_sender, EmailGuardError, ResolvedSender, SenderIdentity,
};
