//! Configuration loading
//!
//! # Hierarchy
//!
//! Later sources override earlier ones:
//! 1. Built-in defaults
//! 2. Config file: `--config <path>`, else `./bookcheck.toml` if present
//! 3. Environment variables: `BOOKCHECK_*`
//! 4. CLI flags
//!
//! # Example Config
//!
//! ```toml
//! base_url = "http://216.10.245.166"
//! record_count = 12
//! create_concurrency = 1
//! timeout_ms = 10000
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use bookcheck_core::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::session::SessionOptions;

pub const DEFAULT_BASE_URL: &str = "http://216.10.245.166";
pub const DEFAULT_RECORD_COUNT: usize = 12;
pub const DEFAULT_CONFIG_FILE: &str = "bookcheck.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the Library API
    pub base_url: String,
    /// Books generated for the create phase
    pub record_count: usize,
    /// Creates in flight at once
    pub create_concurrency: usize,
    /// Per-request timeout; `None` leaves the client default
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            record_count: DEFAULT_RECORD_COUNT,
            create_concurrency: 1,
            timeout_ms: None,
        }
    }
}

/// Only explicitly set keys are `Some` and override lower layers
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub base_url: Option<String>,
    pub record_count: Option<usize>,
    pub create_concurrency: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn merge_partial(&mut self, partial: PartialConfig) {
        if let Some(base_url) = partial.base_url {
            self.base_url = base_url;
        }
        if let Some(record_count) = partial.record_count {
            self.record_count = record_count;
        }
        if let Some(create_concurrency) = partial.create_concurrency {
            self.create_concurrency = create_concurrency;
        }
        if let Some(timeout_ms) = partial.timeout_ms {
            self.timeout_ms = Some(timeout_ms);
        }
    }

    /// Apply `BOOKCHECK_*` overrides read through `lookup`
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BOOKCHECK_BASE_URL") {
            self.base_url = value;
        }

        if let Some(value) = lookup("BOOKCHECK_RECORD_COUNT") {
            self.record_count = value.parse().map_err(|e| {
                Error::InvalidConfig(format!("Invalid BOOKCHECK_RECORD_COUNT value: {e}"))
            })?;
        }

        if let Some(value) = lookup("BOOKCHECK_CREATE_CONCURRENCY") {
            self.create_concurrency = value.parse().map_err(|e| {
                Error::InvalidConfig(format!("Invalid BOOKCHECK_CREATE_CONCURRENCY value: {e}"))
            })?;
        }

        if let Some(value) = lookup("BOOKCHECK_TIMEOUT_MS") {
            self.timeout_ms = Some(value.parse().map_err(|e| {
                Error::InvalidConfig(format!("Invalid BOOKCHECK_TIMEOUT_MS value: {e}"))
            })?);
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Returns error if:
    /// - `record_count` or `create_concurrency` is zero
    /// - `base_url` is not an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(Error::InvalidConfig(
                "record_count must be greater than 0".to_string(),
            ));
        }
        if self.create_concurrency == 0 {
            return Err(Error::InvalidConfig(
                "create_concurrency must be greater than 0".to_string(),
            ));
        }
        let url = Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidConfig(format!("Invalid base_url '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    #[must_use]
    pub const fn session_options(&self) -> SessionOptions {
        SessionOptions {
            record_count: self.record_count,
            create_concurrency: self.create_concurrency,
        }
    }
}

/// Load configuration from every layer and validate it
///
/// # Errors
///
/// Returns error if:
/// - An explicitly requested config file cannot be read
/// - A config file is malformed TOML or has unknown keys
/// - An environment variable is invalid
/// - The merged values fail validation
pub async fn load_config(explicit: Option<&Path>, cli: PartialConfig) -> Result<Config> {
    let mut config = Config::default();

    match explicit {
        Some(path) => config.merge_partial(load_partial_toml_file(path).await?),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                config.merge_partial(load_partial_toml_file(&path).await?);
            }
        }
    }

    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_partial(cli);
    config.validate()?;

    Ok(config)
}

/// # Errors
///
/// Returns error if the file cannot be read or parsed
async fn load_partial_toml_file(path: &Path) -> Result<PartialConfig> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        Error::InvalidConfig(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::InvalidConfig(format!(
            "Failed to parse config: {}: {e}",
            path.display()
        ))
    })
}
