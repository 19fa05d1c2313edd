//! Client configuration
//!
//! Holds the API key, the service base URL and the default content
//! language. A configuration is validated when it is built and is read-only
//! afterwards.

use thiserror::Error;
use url::Url;

/// Base URL of the public service
pub const DEFAULT_BASE_URL: &str = "http://thetvdb.com";

/// Language used when a call does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Errors that can occur while building a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was given
    #[error("API key must not be empty")]
    EmptyApiKey,

    /// The base URL could not be parsed
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    /// The base URL cannot have path segments appended (e.g. `mailto:`)
    #[error("Base URL '{0}' cannot be used as a base for API paths")]
    CannotBeABase(String),
}

/// Settings shared by every request of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    default_language: String,
}

impl ClientConfig {
    /// Creates a configuration for the public service with the given API key
    pub fn new(api_key: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            default_language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Points the client at another host, e.g. a local stub server
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Sets the language used when a call passes `None`
    ///
    /// An empty language keeps the current default.
    pub fn with_default_language(mut self, language: &str) -> Self {
        let language = language.trim();
        if !language.is_empty() {
            self.default_language = language.to_string();
        }
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source: e,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::CannotBeABase(raw.to_string()));
    }

    Ok(url)
}
