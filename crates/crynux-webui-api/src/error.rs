//! Error types for transport and configuration operations.

use std::io;

use thiserror::Error;

/// Failure reported by an [`HttpTransport`](crate::HttpTransport).
///
/// The settings client hands these back to its caller untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be assembled from the base URL and path.
    #[error("invalid request URL '{url}'")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("request failed")]
    Request(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },
    /// The response body was not valid JSON.
    #[error("response body is not valid JSON")]
    Decode(#[source] serde_json::Error),
}

impl TransportError {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::InvalidUrl { .. } | Self::Request(_) | Self::Decode(_) => None,
        }
    }
}

/// Convenience alias for transport results.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors raised while loading [`WebUiConfig`](crate::WebUiConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read configuration file '{path}'")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The configuration document is not valid JSON for the expected shape.
    #[error("configuration is not valid JSON")]
    Parse(#[source] serde_json::Error),
    /// `base_url` is not an absolute URL.
    #[error("invalid base_url '{value}'")]
    InvalidBaseUrl {
        /// Value found in the configuration.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
