//! Authentication module

pub mod identity;
pub mod middleware;
pub mod password;
pub mod token;

pub use identity::{IdentityResolver, PgIdentityResolver, UserIdentity, CAP_AUTHENTICATED};
pub use middleware::{auth_gate, classify, extract_token, AuthContext, GateDecision};
pub use password::PasswordHasher;
pub use token::{Claims, TokenCodec};
