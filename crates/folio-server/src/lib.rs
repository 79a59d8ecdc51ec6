//! # folio-server
//!
//! HTTP API over the Folio project store, plus the `folio` binary.

pub mod http;

pub use http::{ApiError, build_router};
