//! Startup configuration from the environment.
//!
//! Two variables matter: the API base URL (optional, with a local default)
//! and the identity provider's publishable key, without which the app
//! cannot start.

use std::env;

use thiserror::Error;

pub const API_URL_VAR: &str = "ADMIN_API_URL";
pub const PUBLISHABLE_KEY_VAR: &str = "ADMIN_PUBLISHABLE_KEY";
pub const DEFAULT_API_URL: &str = "http://localhost:8787/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ADMIN_PUBLISHABLE_KEY is not set; the identity provider cannot be initialized")]
    MissingPublishableKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub publishable_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let publishable_key = lookup(PUBLISHABLE_KEY_VAR).ok_or(ConfigError::MissingPublishableKey)?;
        Ok(Self {
            api_url,
            publishable_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_defaults_when_unset() {
        let config = Config::from_lookup(|name| {
            (name == PUBLISHABLE_KEY_VAR).then(|| "pk_test_123".to_string())
        })
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.publishable_key, "pk_test_123");
    }

    #[test]
    fn missing_publishable_key_is_fatal() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::MissingPublishableKey);
    }

    #[test]
    fn explicit_api_url_wins() {
        let config = Config::from_lookup(|name| match name {
            API_URL_VAR => Some("https://api.example.org/api".to_string()),
            PUBLISHABLE_KEY_VAR => Some("pk_live_456".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.org/api");
    }
}
