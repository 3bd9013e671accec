//! # Products
//!
//! `products` is a small REST service that manages a single resource, the
//! **Product** (`id`, `name`, `price`, `availability`), stored in `PostgreSQL`.
//!
//! ## Request pipeline
//!
//! Every route declares an ordered list of field rules. All rules run on every
//! request, failures are collected in declaration order and, when any failed,
//! the request is answered with `400 {"errors": [...]}` before the handler
//! touches the store. Handlers then perform exactly one store operation.
//!
//! ## Storage
//!
//! Handlers talk to a [`store::ProductStore`] injected at startup. The
//! `PostgreSQL` implementation is used in production; an in-process store backs
//! tests and `--dsn memory://`.
//!
//! ## Degraded mode
//!
//! If the database cannot be reached at startup the error is logged and the
//! server keeps running; data routes answer `500` until the database is back.

pub mod api;
pub mod cli;
pub mod db;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
