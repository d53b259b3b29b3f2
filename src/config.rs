//! Provider configuration.
//!
//! The host hands over a [`ProviderSettings`] block; each value falls back to an
//! environment variable when the block leaves it out. Missing values are reported
//! together so the user can fix both in one pass.

use serde::Deserialize;
use std::fmt;

/// Environment fallback for `base_url`.
pub const BASE_URL_ENV: &str = "N8N_URL";
/// Environment fallback for `api_key`.
pub const API_KEY_ENV: &str = "N8N_API_TOKEN";

/// Provider block as declared by the user. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Resolved connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing API key: set `api_key` in the provider block or the N8N_API_TOKEN environment variable")]
    MissingApiKey,

    #[error("missing base URL: set `base_url` in the provider block or the N8N_URL environment variable")]
    MissingBaseUrl,

    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ConfigError>),

    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// The individual problems, flattened.
    pub fn problems(&self) -> Vec<&ConfigError> {
        match self {
            ConfigError::Multiple(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Resolves against the process environment.
    pub fn resolve(settings: &ProviderSettings) -> Result<Self, ConfigError> {
        Self::resolve_with(settings, |name| std::env::var(name).ok())
    }

    /// Resolves against `env`, which looks up a variable by name.
    pub fn resolve_with<F>(settings: &ProviderSettings, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, name: &str| {
            explicit
                .clone()
                .filter(|value| !value.is_empty())
                .or_else(|| env(name).filter(|value| !value.is_empty()))
        };
        let api_key = pick(&settings.api_key, API_KEY_ENV);
        let base_url = pick(&settings.base_url, BASE_URL_ENV);

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => Ok(Self { base_url, api_key }),
            (Some(_), None) => Err(ConfigError::MissingApiKey),
            (None, Some(_)) => Err(ConfigError::MissingBaseUrl),
            (None, None) => Err(ConfigError::Multiple(vec![
                ConfigError::MissingApiKey,
                ConfigError::MissingBaseUrl,
            ])),
        }
    }
}
