//! HTTP transport seam and its reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::WebUiConfig;
use crate::error::{TransportError, TransportResult};

/// Header carrying the caller's trace identifier.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

/// Minimal JSON-over-HTTP capability the API clients are built on.
///
/// Paths are resource paths such as `/settings`; implementations resolve them
/// against their own base URL. Failures are reported as-is, implementations
/// must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a `GET` for `path` and return the decoded response body.
    async fn get(&self, path: &str) -> TransportResult<Value>;

    /// Issue a `POST` of `body` to `path` and return the decoded response body.
    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value>;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    request_id: Option<String>,
}

impl ReqwestTransport {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            request_id: None,
        }
    }

    /// Build a client honouring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when the underlying client cannot be built.
    pub fn from_config(config: &WebUiConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::Request)?;
        Ok(Self::new(client, config.base_url.clone()))
    }

    /// Attach `request_id` as [`HEADER_REQUEST_ID`] on every request.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> TransportResult<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> TransportResult<Value> {
        let url = self.url_for(path)?;
        debug!(method = %method, url = %url, "sending request");

        let mut request = self.client.request(method, url);
        if let Some(id) = &self.request_id {
            request = request.header(HEADER_REQUEST_ID, id);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(TransportError::Request)?;
        read_json(response).await
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> TransportResult<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value> {
        self.send(Method::POST, path, Some(body)).await
    }
}

async fn read_json(response: Response) -> TransportResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(TransportError::Request)?;
    debug!(status = status.as_u16(), len = bytes.len(), "response received");

    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(TransportError::Decode)
}
