//! Authentication adapters.
//!
//! - `JwtActorValidator` - HS256 bearer tokens signed with a shared secret
//! - `MockActorValidator` - Token table for tests

mod jwt;
mod mock;

pub use jwt::JwtActorValidator;
pub use mock::MockActorValidator;
