//! Authentication module
//!
//! The backend uses one static bearer token for every caller. There is no
//! login flow and no per-user credential.

mod authenticator;

pub use authenticator::{AuthConfig, Authenticator, DEFAULT_TOKEN};
