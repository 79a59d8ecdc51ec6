//! # folio-store
//!
//! Local persistence and sync orchestration for Folio.
//!
//! - [`LocalStore`]: the single JSON document holding the last known records.
//! - [`ProjectStore`]: fetch from a [`folio_github::RepositorySource`], merge
//!   with the cached images, persist, and apply field updates by id.

mod error;
pub mod local;
pub mod project;

pub use error::StoreError;
pub use local::{LocalStore, Snapshot, SnapshotOrigin};
pub use project::{Freshness, ProjectStore, SyncOutcome, UpdateReport, merge_images};
