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

//! Development proxy that forwards manager API requests to a node backend.
//!
//! During UI development the page is served from one origin while the node
//! manager API lives on another. Requests under the configured prefix
//! (`/manager` by default) are relayed verbatim to the backend origin;
//! everything else is answered with `404`.
//!
//! Layout: `config.rs` (listen address, prefix, target), `forward.rs`
//! (router and relay handler), `error.rs`.

pub mod config;
pub mod error;
pub mod forward;

pub use config::{DEFAULT_LISTEN_ADDR, DEFAULT_PREFIX, DEFAULT_TARGET, ProxyConfig, TARGET_ENV};
pub use error::{ProxyError, ProxyResult};
pub use forward::{router, serve, serve_on};
