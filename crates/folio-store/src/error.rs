//! Store error types.

use std::path::PathBuf;

use folio_core::CoreError;
use thiserror::Error;

/// Errors from the local document and the project store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or deleting the local document failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Validation or lookup failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
