//! Email handlers - the context guard and the `send_email` tool.

mod guard;
mod send_email;

pub use guard::{AuthorizedEmail, EmailContextGuard, EmailRequest};
pub use send_email::SendEmailHandler;
