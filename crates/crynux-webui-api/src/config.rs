//! Client configuration read from the web UI `config.json`.
//!
//! # Design
//! - Only `base_url` is required by the front-end; everything else defaults.
//! - The base URL is validated once here so transports can assume it parses.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Base URL used when no configuration is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7412/manager/v1";
/// Request timeout applied by the reqwest transport, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the settings client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebUiConfig {
    /// Absolute URL prefixed to every resource path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WebUiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WebUiConfig {
    /// Build a configuration pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when `base_url` is not an absolute URL.
    pub fn with_base_url(base_url: impl Into<String>) -> ConfigResult<Self> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a `config.json` document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is not valid JSON or carries an invalid `base_url`.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a `config.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or its contents are invalid.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parsed form of [`Self::base_url`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the stored value does not parse.
    pub fn parsed_base_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.base_url.clone(),
            source,
        })
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.parsed_base_url().map(|_| ())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
