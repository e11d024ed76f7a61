//! Runtime settings of the console core.
//!
//! Read from `LENDING_ADMIN_*` environment variables:
//!
//! | Variable                       | Default                 |
//! |--------------------------------|-------------------------|
//! | `LENDING_ADMIN_API_URL`        | `http://127.0.0.1:5000` |
//! | `LENDING_ADMIN_TOAST_MS`       | `2600`                  |
//! | `LENDING_ADMIN_LOAD_ORDERING`  | `last-resolved`         |

use std::env::vars;
use std::time::Duration;

use serde::Deserialize;

use crate::list::LoadOrdering;
use crate::toast::DEFAULT_TOAST_DURATION;

pub const ENV_PREFIX: &str = "LENDING_ADMIN_";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment configuration: {0}")]
    Env(#[from] serde_env::Error),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_url: Option<String>,
    toast_ms: Option<u64>,
    load_ordering: Option<LoadOrdering>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
    pub toast_duration: Duration,
    pub load_ordering: LoadOrdering,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            toast_duration: DEFAULT_TOAST_DURATION,
            load_ordering: LoadOrdering::default(),
        }
    }
}

impl BusinessConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(vars())
    }

    /// Build from `(name, value)` pairs; names without the prefix are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = if scoped.is_empty() {
            RawConfig::default()
        } else {
            serde_env::from_iter(scoped)?
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = match raw.api_url {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::Empty("LENDING_ADMIN_API_URL")),
            Some(url) => url.trim().to_owned(),
            None => defaults.api_base_url,
        };

        Ok(Self {
            api_base_url,
            toast_duration: raw
                .toast_ms
                .map_or(defaults.toast_duration, Duration::from_millis),
            load_ordering: raw.load_ordering.unwrap_or(defaults.load_ordering),
        })
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_variables() {
        let config = BusinessConfig::from_vars(Vec::<(String, String)>::new()).expect("config");
        assert_eq!(config, BusinessConfig::default());
        assert_eq!(config.toast_duration, Duration::from_millis(2600));
        assert_eq!(config.load_ordering, LoadOrdering::LastResolved);
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let config = BusinessConfig::from_vars(vec![
            ("LENDING_ADMIN_API_URL", "https://lending.example.org"),
            ("LENDING_ADMIN_TOAST_MS", "500"),
            ("LENDING_ADMIN_LOAD_ORDERING", "latest-issued"),
            ("PATH", "/usr/bin"),
        ])
        .expect("config");

        assert_eq!(config.api_base_url, "https://lending.example.org");
        assert_eq!(config.toast_duration, Duration::from_millis(500));
        assert_eq!(config.load_ordering, LoadOrdering::LatestIssued);
    }

    #[test]
    fn test_blank_url_rejected() {
        let result = BusinessConfig::from_vars(vec![("LENDING_ADMIN_API_URL", "  ")]);
        assert!(matches!(result, Err(ConfigError::Empty(_))));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let result = BusinessConfig::from_vars(vec![("LENDING_ADMIN_TOAST_MS", "soon")]);
        assert!(matches!(result, Err(ConfigError::Env(_))));
    }
}
