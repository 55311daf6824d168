//! Router and relay handler.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::{Client, redirect::Policy};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::ProxyConfig;
use crate::error::{ProxyError, ProxyResult};

/// Largest request body relayed upstream.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const HOP_BY_HOP: [header::HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HeaderName::from_static("keep-alive"),
];

struct ProxyState {
    client: Client,
    config: ProxyConfig,
}

/// Build the proxy router.
///
/// # Errors
///
/// Returns [`ProxyError::Client`] when the upstream client cannot be built.
pub fn router(config: ProxyConfig) -> ProxyResult<Router> {
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(ProxyError::Client)?;
    let state = Arc::new(ProxyState { client, config });
    Ok(Router::new()
        .fallback(forward)
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

/// Bind `config.listen` and serve until the process stops.
///
/// # Errors
///
/// Returns an error if the listener fails to bind or the server terminates unexpectedly.
pub async fn serve(config: ProxyConfig) -> ProxyResult<()> {
    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(ProxyError::Bind)?;
    serve_on(listener, config).await
}

/// Serve on an already bound listener.
///
/// # Errors
///
/// Returns an error if the server terminates unexpectedly.
pub async fn serve_on(listener: TcpListener, config: ProxyConfig) -> ProxyResult<()> {
    info!(
        listen = ?listener.local_addr().ok(),
        prefix = %config.prefix,
        target = %config.target,
        "dev proxy listening"
    );
    let app = router(config)?;
    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ProxyError::Serve)
}

async fn forward(State(state): State<Arc<ProxyState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let Some(url) = state
        .config
        .upstream_url(parts.uri.path(), parts.uri.query())
    else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "failed to read request body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    // reqwest derives Host from the target URL.
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);

    debug!(method = %parts.method, upstream = %url, "forwarding request");
    let upstream = state
        .client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .send()
        .await;

    match upstream {
        Ok(response) => relay(response).await,
        Err(err) => {
            warn!(error = %err, "upstream request failed");
            (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response()
        }
    }
}

async fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);

    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(err) => {
            warn!(error = %err, "failed to read upstream body");
            (StatusCode::BAD_GATEWAY, "upstream body unreadable").into_response()
        }
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}
