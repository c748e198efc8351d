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

//! GraphQL dispatcher for Lagoon user and SSH key administration.
//!
//! Every operation builds a fixed document, binds its variables, sends it
//! through a [`GraphqlExecutor`], and returns the JSON bytes of the single
//! result field named after the operation.
//!
//! Layout:
//! - `documents.rs`: fragment and document text
//! - `operation.rs`: operation names and the typed response envelope
//! - `executor.rs`: execution capability trait and the HTTP implementation
//! - `client.rs`: `ApiClient` and the shared dispatch path
//! - `users.rs` / `ssh_keys.rs`: per-operation variable binding
//! - `diagnostics.rs`: request/response dumps behind the debug flag

mod client;
pub mod config;
mod diagnostics;
pub mod documents;
pub mod error;
pub mod executor;
pub mod operation;
mod ssh_keys;
mod users;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use executor::{GraphqlExecutor, GraphqlRequest, HttpExecutor, SharedExecutor};
pub use lagoon_api_models as models;
pub use operation::{Operation, ResponseData};
