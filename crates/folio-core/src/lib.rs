//! # folio-core
//!
//! Core types and error types for Folio.
//!
//! This crate provides the foundational types shared across all Folio crates:
//! - The [`Repository`] record as persisted in the local document and served
//!   over HTTP
//! - Typed field updates ([`ProjectField`], [`ProjectUpdate`]) validated at the
//!   boundary
//! - Cross-cutting error types

pub mod errors;
pub mod repository;
pub mod update;

pub use errors::CoreError;
pub use repository::{DEFAULT_IMAGE, Owner, Repository};
pub use update::{ProjectField, ProjectUpdate, ProjectUpdateBuilder, SkippedField};
