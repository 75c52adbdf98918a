//! Authentication and authorization
//!
//! - [`credentials`]: hashed secrets for the three principal kinds
//! - [`token`]: signed, time-limited session tokens
//! - [`guard`]: role/restaurant authorization rules
//! - [`extractor`]: axum extractor yielding verified [`SessionClaims`]
//! - [`rate_limit`]: per-IP limits on login and registration

pub mod credentials;
pub mod extractor;
pub mod guard;
pub mod rate_limit;
pub mod token;

pub use guard::{Action, Decision, Deny};
pub use token::{SessionClaims, TokenService};
