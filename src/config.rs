//! Process-environment configuration.
//!
//! Read once at startup:
//!
//! - `TASKDAY_API_URL` — base URL of the task store (required)
//! - `TASKDAY_BASE_URL` — base URL for media and other static data (optional)
//! - `TASKDAY_TITLE` — application title shown by the presentation layer
//!   (defaults to `"Taskday"`)

use std::env;

/// Default application title when `TASKDAY_TITLE` is unset.
pub const DEFAULT_TITLE: &str = "Taskday";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the task store REST API.
    pub api_url: String,
    /// Base URL for media assets, when the deployment serves any.
    pub base_url: Option<String>,
    /// Application title.
    pub title: String,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through a lookup function. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("TASKDAY_API_URL").ok_or(ConfigError::MissingVar("TASKDAY_API_URL"))?;
        let base_url = get("TASKDAY_BASE_URL");
        let title = get("TASKDAY_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Self {
            api_url,
            base_url,
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_lookup(lookup_from(&[
            ("TASKDAY_API_URL", "http://store.local/api"),
            ("TASKDAY_BASE_URL", "http://store.local"),
            ("TASKDAY_TITLE", "Roster"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://store.local/api");
        assert_eq!(config.base_url.as_deref(), Some("http://store.local"));
        assert_eq!(config.title, "Roster");
    }

    #[test]
    fn test_defaults() {
        let config =
            Config::from_lookup(lookup_from(&[("TASKDAY_API_URL", "http://store.local/api")]))
                .unwrap();

        assert_eq!(config.base_url, None);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_missing_api_url() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("TASKDAY_API_URL")));

        // Blank counts as missing.
        let err = Config::from_lookup(lookup_from(&[("TASKDAY_API_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }
}
