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

//! Display preference state shared across one running web UI instance.
//!
//! # Design
//! - The store is an explicit value owned by whoever wires the UI together;
//!   there is no process-wide singleton.
//! - Clones are handles onto the same state, so a write through one handle is
//!   visible to every other handle at once.
//! - Single-threaded by construction (`Rc`), matching the UI event loop.

pub mod store;

pub use store::{SystemStore, UiPreferences};
