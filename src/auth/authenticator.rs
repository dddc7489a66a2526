//! Authenticator implementation
//!
//! Applies the configured credential to outgoing requests.

use reqwest::RequestBuilder;
use std::fmt;

/// Token the public site sends when no token is configured
pub const DEFAULT_TOKEN: &str = "no-token-secret";

/// Authentication configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication header
    None,

    /// Static bearer token, backend-wide
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Bearer token with the public default value
    #[default]
    PublicToken,
}

impl AuthConfig {
    /// Create a bearer config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// The token that will be sent, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Bearer { token } => Some(token),
            Self::PublicToken => Some(DEFAULT_TOKEN),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
            Self::PublicToken => f.write_str("PublicToken"),
        }
    }
}

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self.config.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}
