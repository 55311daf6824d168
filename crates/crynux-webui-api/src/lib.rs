#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Client for the node manager `settings` resource.
//!
//! Layout: `config.rs` (where the client points and how long it waits),
//! `transport.rs` (the `HttpTransport` seam plus the reqwest implementation),
//! `settings.rs` (`SettingsClient`), `error.rs` (transport and config errors).

pub mod config;
pub mod error;
pub mod settings;
pub mod transport;

pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, WebUiConfig};
pub use error::{ConfigError, ConfigResult, TransportError, TransportResult};
pub use settings::{SETTINGS_PATH, SettingsClient, SettingsPayload};
pub use transport::{HEADER_REQUEST_ID, HttpTransport, ReqwestTransport};
