//! Client for the `/settings` resource.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::error::TransportResult;
use crate::transport::HttpTransport;

/// Resource path for node settings, relative to the API base URL.
pub const SETTINGS_PATH: &str = "/settings";

/// Settings document exchanged with the server.
///
/// The shape is owned by the server; the client never inspects it.
pub type SettingsPayload = Value;

/// Loads and saves node settings through an injected [`HttpTransport`].
///
/// Every call maps to exactly one request. Nothing is cached and errors are
/// returned exactly as the transport produced them.
#[derive(Clone)]
pub struct SettingsClient {
    transport: Arc<dyn HttpTransport>,
}

impl SettingsClient {
    /// Build a client over `transport`.
    #[must_use]
    pub const fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// `GET /settings`.
    ///
    /// # Errors
    ///
    /// Propagates the transport error unchanged.
    #[instrument(skip(self))]
    pub async fn fetch_settings(&self) -> TransportResult<SettingsPayload> {
        self.transport.get(SETTINGS_PATH).await
    }

    /// `POST /settings` with `settings` as the body; returns the server's reply.
    ///
    /// # Errors
    ///
    /// Propagates the transport error unchanged.
    #[instrument(skip(self, settings))]
    pub async fn update_settings(
        &self,
        settings: &SettingsPayload,
    ) -> TransportResult<SettingsPayload> {
        self.transport.post(SETTINGS_PATH, settings).await
    }
}

impl std::fmt::Debug for SettingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsClient").finish_non_exhaustive()
    }
}
