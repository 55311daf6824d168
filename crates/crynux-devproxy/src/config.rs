//! Proxy settings.

use std::net::SocketAddr;

use url::Url;

use crate::error::{ProxyError, ProxyResult};

/// Path prefix forwarded to the backend.
pub const DEFAULT_PREFIX: &str = "/manager";
/// Backend origin used when none is configured.
pub const DEFAULT_TARGET: &str = "http://localhost:7412";
/// Address the proxy listens on by default.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
/// Environment variable overriding the backend origin.
pub const TARGET_ENV: &str = "CRYNUX_API_BASE_URL";

/// Where the proxy listens, what it forwards and where to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Listen socket.
    pub listen: SocketAddr,
    /// Forwarded path prefix, always starting with `/` and never ending with one.
    pub prefix: String,
    /// Backend origin requests are relayed to.
    pub target: Url,
}

impl ProxyConfig {
    /// Validate and assemble a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when `target` is not an absolute http(s) URL or
    /// `prefix` does not start with `/`.
    pub fn new(listen: SocketAddr, prefix: &str, target: &str) -> ProxyResult<Self> {
        Ok(Self {
            listen,
            prefix: normalize_prefix(prefix)?,
            target: parse_target(target)?,
        })
    }

    /// Whether `path` falls under the forwarded prefix.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Upstream URL for a request path and optional query string.
    ///
    /// Returns `None` when the path, once dot segments (raw or
    /// percent-encoded) are resolved, no longer falls under the prefix.
    #[must_use]
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Option<Url> {
        if !self.matches(path) {
            return None;
        }
        let mut url = self.target.clone();
        let base_path = self.target.path().trim_end_matches('/');
        url.set_path(&format!("{base_path}{path}"));
        url.set_query(query);
        let resolved = url.path().strip_prefix(base_path)?;
        self.matches(resolved).then_some(url)
    }
}

fn normalize_prefix(prefix: &str) -> ProxyResult<String> {
    if !prefix.starts_with('/') {
        return Err(ProxyError::InvalidPrefix(prefix.to_string()));
    }
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ProxyError::InvalidPrefix(prefix.to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_target(target: &str) -> ProxyResult<Url> {
    let invalid = || ProxyError::InvalidTarget {
        value: target.to_string(),
    };
    let url = Url::parse(target).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}
