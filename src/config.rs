//! Runtime settings
//!
//! Settings are layered: built-in defaults, then a YAML or JSON file, then
//! the `MELIAN_API_URL` / `MELIAN_API_TOKEN` environment variables, then
//! command-line overrides.

use crate::auth::AuthConfig;
use crate::catalog::ListKind;
use crate::error::{Error, Result, ResultExt};
use crate::fetcher::CatalogClient;
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::types::{LogLevel, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable holding the backend base URL
pub const ENV_API_URL: &str = "MELIAN_API_URL";

/// Environment variable holding the bearer token
pub const ENV_API_TOKEN: &str = "MELIAN_API_TOKEN";

// ============================================================================
// Settings
// ============================================================================

/// Complete runtime settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend connection
    pub api: ApiSettings,

    /// Page size overrides per list kind
    pub page_sizes: HashMap<ListKind, u32>,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
}

/// Backend connection settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every endpoint path is appended to
    pub base_url: Option<String>,

    /// Bearer token; the public token is used when unset
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retries per request
    pub max_retries: u32,

    /// Client-side rate limit, 0 disables it
    pub requests_per_second: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: 15,
            max_retries: 2,
            requests_per_second: 10,
        }
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

impl Settings {
    /// Load defaults, an optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_from(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Parse a settings file, choosing the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let settings = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported settings file '{}': expected .yaml, .yml or .json",
                    path.display()
                )))
            }
        };

        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Parse YAML settings
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse JSON settings
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).none_if_empty() {
            self.api.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).none_if_empty() {
            self.api.token = Some(token);
        }
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url.none_if_empty() {
            self.api.base_url = Some(url);
        }
        if let Some(token) = token.none_if_empty() {
            self.api.token = Some(token);
        }
        self
    }

    /// Check the settings and return the parsed base URL
    pub fn validate(&self) -> Result<Url> {
        let raw = self
            .api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::missing_field("api.base_url"))?;

        let url = Url::parse(raw)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if url.cannot_be_a_base() {
            return Err(Error::invalid_value("api.base_url", "URL cannot be a base"));
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::invalid_value("api.timeout_secs", "must be greater than zero"));
        }

        if let Some((kind, _)) = self.page_sizes.iter().find(|(_, size)| **size == 0) {
            return Err(Error::invalid_value(
                format!("page_sizes.{kind}"),
                "must be greater than zero",
            ));
        }

        Ok(url)
    }

    /// Page size for a list kind, honoring overrides
    pub fn page_size(&self, kind: ListKind) -> u32 {
        self.page_sizes
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_page_size())
    }

    /// Authentication derived from the token setting
    pub fn auth_config(&self) -> AuthConfig {
        match self.api.token.clone().none_if_empty() {
            Some(token) => AuthConfig::bearer(token),
            None => AuthConfig::PublicToken,
        }
    }

    /// HTTP client configuration
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        let url = self.validate()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(url.as_str())
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .max_retries(self.api.max_retries);

        builder = match self.api.requests_per_second {
            0 => builder.no_rate_limit(),
            rps => builder.rate_limit(RateLimiterConfig::per_second(rps)),
        };

        Ok(builder.build())
    }

    /// Build a catalog client from these settings
    pub fn catalog(&self) -> Result<CatalogClient> {
        let client = HttpClient::with_auth(self.http_config()?, self.auth_config())?;
        Ok(CatalogClient::new(client))
    }
}
