//! Session configuration loaded from the environment.
//!
//! `Config::from_env` reads a `.env` file from the working directory (if one
//! exists) before looking at the process environment, so a checked-out suite
//! only needs a `.env` with `BASE_URL=...` to run the live scenarios.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "BASE_URL";
pub const LOG_DIR_VAR: &str = "API_LOG_DIR";

/// Where request/response logs go unless `API_LOG_DIR` says otherwise.
/// Relative, so it resolves against the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;
        let base_url = raw.trim().to_string();
        Url::parse(&base_url).map_err(|e| ConfigError::InvalidUrl {
            var: BASE_URL_VAR,
            value: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut config = Self::new(base_url);
        if let Some(dir) = lookup(LOG_DIR_VAR).filter(|value| !value.trim().is_empty()) {
            config.log_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn reads_base_url_and_default_log_dir() {
        let config = Config::from_lookup(lookup(&[("BASE_URL", "https://reqres.in/api")])).unwrap();
        assert_eq!(config.base_url, "https://reqres.in/api");
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn log_dir_can_be_overridden() {
        let config = Config::from_lookup(lookup(&[
            ("BASE_URL", "http://127.0.0.1:3000"),
            ("API_LOG_DIR", "/tmp/api-logs"),
        ]))
        .unwrap();
        assert_eq!(config.log_dir, PathBuf::from("/tmp/api-logs"));
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("BASE_URL")));
    }

    #[test]
    fn blank_base_url_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("BASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = Config::from_lookup(lookup(&[("BASE_URL", "reqres.in/api")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
