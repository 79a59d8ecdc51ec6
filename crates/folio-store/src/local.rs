//! Local persistence of the repository document.
//!
//! The document is a single JSON array of [`Repository`] records. It is always
//! read and written whole: no partial writes, no versioning.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::Repository;

use crate::error::StoreError;

/// How a [`Snapshot`] came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Parsed from an existing document.
    Document,
    /// No document exists yet.
    Missing,
    /// The document exists but is not valid JSON; its contents were discarded.
    RecoveredFromCorruption,
}

/// The records held by the local document at the time of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<Repository>,
    pub origin: SnapshotOrigin,
}

impl Snapshot {
    const fn empty(origin: SnapshotOrigin) -> Self {
        Self {
            records: Vec::new(),
            origin,
        }
    }

    /// Whether a malformed document was read as empty.
    #[must_use]
    pub fn recovered_from_corruption(&self) -> bool {
        self.origin == SnapshotOrigin::RecoveredFromCorruption
    }
}

/// The on-disk repository document.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document.
    ///
    /// A missing document is an empty snapshot, not an error. A malformed one
    /// is also read as empty, tagged [`SnapshotOrigin::RecoveredFromCorruption`]
    /// and logged, so the application stays usable at the cost of the lost
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read.
    pub async fn read(&self) -> Result<Snapshot, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Snapshot::empty(SnapshotOrigin::Missing));
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match serde_json::from_slice::<Vec<Repository>>(&bytes) {
            Ok(records) => Ok(Snapshot {
                records,
                origin: SnapshotOrigin::Document,
            }),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "local repository document is malformed; reading it as empty"
                );
                Ok(Snapshot::empty(SnapshotOrigin::RecoveredFromCorruption))
            }
        }
    }

    /// Overwrite the document with `records`.
    ///
    /// Writes a sibling temporary file and renames it into place, so readers
    /// see either the old document or the new one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory, temporary file, or rename
    /// fails.
    pub async fn write(&self, records: &[Repository]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "wrote local document");
        Ok(())
    }

    /// Delete the document. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
