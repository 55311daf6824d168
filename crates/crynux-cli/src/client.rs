//! Shared client context, error types and argument helpers for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::sync::Arc;

use anyhow::anyhow;
use crynux_webui_api::{ConfigError, ReqwestTransport, SettingsClient, TransportError, WebUiConfig};
use serde_json::Value;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::validation(format!("{:#}", anyhow::Error::new(err)))
    }
}

/// Application context passed to settings handlers.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) settings: SettingsClient,
}

impl AppContext {
    /// Build the settings client for `config`, tagging requests with `trace_id`.
    pub(crate) fn from_config(config: &WebUiConfig, trace_id: &str) -> CliResult<Self> {
        let transport = ReqwestTransport::from_config(config)
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?
            .with_request_id(trace_id);
        Ok(Self::with_transport(transport))
    }

    pub(crate) fn with_transport(transport: ReqwestTransport) -> Self {
        Self {
            settings: SettingsClient::new(Arc::new(transport)),
        }
    }
}

/// Resolve the client configuration from `--config`, `--base-url` and
/// `--timeout`. Flags win over the file.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    base_url: Option<&str>,
    timeout_secs: Option<u64>,
) -> CliResult<WebUiConfig> {
    let mut config = match config_path {
        Some(path) => WebUiConfig::from_file(path)?,
        None => WebUiConfig::default(),
    };
    if let Some(base_url) = base_url {
        config.base_url = WebUiConfig::with_base_url(base_url)?.base_url;
    }
    if let Some(timeout_secs) = timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    tracing::debug!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "resolved client configuration"
    );
    Ok(config)
}

/// Map a transport failure onto the CLI error taxonomy.
///
/// Server-side rejections of the submitted document are validation errors;
/// everything else is operational.
pub(crate) fn classify_transport_error(err: TransportError, action: &str) -> CliError {
    match err {
        TransportError::Status { status, body } if matches!(status, 400 | 409 | 422) => {
            let detail = body.trim();
            if detail.is_empty() {
                CliError::validation(format!("{action} rejected (status {status})"))
            } else {
                CliError::validation(format!("{action} rejected (status {status}): {detail}"))
            }
        }
        other => CliError::failure(anyhow::Error::new(other).context(format!("{action} failed"))),
    }
}

/// Parse a `key=value` settings entry. Values that are not valid JSON are
/// taken as plain strings.
pub(crate) fn parse_assignment(input: &str) -> Result<(String, Value), String> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{input}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{input}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
