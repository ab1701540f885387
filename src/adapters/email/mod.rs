//! Email adapters - Resend over HTTP, and a recording mock.

mod mock;
mod resend;

pub use mock::MockEmailProvider;
pub use resend::{ResendConfig, ResendEmailProvider};
