//! Error types for the development proxy.

use std::io;

use thiserror::Error;

/// Failures while configuring or running the proxy.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Target origin is not an absolute http(s) URL.
    #[error("invalid proxy target '{value}'")]
    InvalidTarget {
        /// Rejected value.
        value: String,
    },
    /// Prefix does not start with `/`.
    #[error("invalid proxy prefix '{0}'")]
    InvalidPrefix(String),
    /// The upstream HTTP client could not be built.
    #[error("failed to build upstream client")]
    Client(#[source] reqwest::Error),
    /// Binding the listen socket failed.
    #[error("failed to bind proxy listener")]
    Bind(#[source] io::Error),
    /// The server loop terminated with an IO error.
    #[error("proxy server terminated")]
    Serve(#[source] io::Error),
}

/// Convenience alias for proxy results.
pub type ProxyResult<T> = Result<T, ProxyError>;
