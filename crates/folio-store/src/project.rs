//! Sync, merge, and field updates over the local repository document.
//!
//! `ProjectStore` owns the remote source and the local document. Every
//! read-modify-write of the document runs under one async writer lock, so two
//! concurrent syncs or updates cannot lose each other's changes. Remote calls
//! happen before the lock is taken.

use std::collections::HashMap;

use folio_core::{CoreError, ProjectUpdate, Repository, SkippedField};
use folio_github::{GithubError, RepositorySource};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::local::LocalStore;

/// Where the records returned by a sync or lookup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Fetched from the remote just now.
    Fresh,
    /// The remote failed; these are the last cached records.
    Stale,
}

/// Result of [`ProjectStore::sync`].
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub records: Vec<Repository>,
    pub freshness: Freshness,
}

/// Result of [`ProjectStore::update_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub id: u64,
    pub applied: Vec<String>,
    pub skipped: Vec<SkippedField>,
}

/// Orchestrates the remote source and the local document.
pub struct ProjectStore<S> {
    source: S,
    local: LocalStore,
    default_image: String,
    write_lock: Mutex<()>,
}

impl<S: RepositorySource> ProjectStore<S> {
    pub fn new(source: S, local: LocalStore, default_image: impl Into<String>) -> Self {
        Self {
            source,
            local,
            default_image: default_image.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn local(&self) -> &LocalStore {
        &self.local
    }

    #[must_use]
    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Fetch from the remote, keep locally curated images, persist, and return.
    ///
    /// If the remote fails, the cached records are returned unchanged and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for local document failures. Remote failures
    /// never surface here.
    pub async fn sync(&self) -> Result<SyncOutcome, StoreError> {
        let fetched = self.source.list().await;

        let _guard = self.write_lock.lock().await;
        let snapshot = self.local.read().await?;

        let fresh = match fetched {
            Ok(fresh) => fresh,
            Err(error) => {
                log_remote_failure("sync", &error);
                return Ok(SyncOutcome {
                    records: snapshot.records,
                    freshness: Freshness::Stale,
                });
            }
        };

        let merged = merge_images(fresh, &snapshot.records, &self.default_image);
        self.local.write(&merged).await?;
        tracing::info!(count = merged.len(), "synced repositories");

        Ok(SyncOutcome {
            records: merged,
            freshness: Freshness::Fresh,
        })
    }

    /// Look up one repository by slug, with its cached image applied.
    ///
    /// Nothing is written. If the remote fails, the cached record with that
    /// name is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an invalid slug and
    /// [`CoreError::NotFound`] if the remote failed and nothing is cached under
    /// that name.
    pub async fn get(&self, name: &str) -> Result<(Repository, Freshness), StoreError> {
        let fetched = match self.source.get(name).await {
            Err(GithubError::InvalidName(slug)) => {
                let reason = format!("invalid repository name: {slug:?}");
                return Err(CoreError::Validation(reason).into());
            }
            other => other,
        };
        let snapshot = self.local.read().await?;

        match fetched {
            Ok(mut repo) => {
                let cached = snapshot
                    .records
                    .iter()
                    .find(|r| r.id == repo.id)
                    .map(|r| r.image.as_str());
                carry_image(&mut repo, cached, &self.default_image);
                Ok((repo, Freshness::Fresh))
            }
            Err(error) => {
                log_remote_failure("get", &error);
                snapshot
                    .records
                    .into_iter()
                    .find(|r| r.name == name)
                    .map(|r| (r, Freshness::Stale))
                    .ok_or_else(|| {
                        CoreError::NotFound {
                            entity_type: "repository".to_string(),
                            id: name.to_string(),
                        }
                        .into()
                    })
            }
        }
    }

    /// The cached records, without contacting the remote.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the document cannot be read.
    pub async fn list_cached(&self) -> Result<Vec<Repository>, StoreError> {
        Ok(self.local.read().await?.records)
    }

    /// Validate a raw JSON payload and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] before any I/O if the payload has no
    /// usable `id`; otherwise as [`Self::update_fields`].
    pub async fn update_from_json(
        &self,
        payload: &serde_json::Value,
    ) -> Result<UpdateReport, StoreError> {
        let update = ProjectUpdate::from_json(payload, &self.default_image)?;
        self.update_fields(update).await
    }

    /// Apply a typed update to the record with `update.id` and persist.
    ///
    /// Fields rejected during validation are logged and reported, and the
    /// rest are still applied and written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] without writing if no cached record has
    /// that id, or [`StoreError::Io`] on document failures.
    pub async fn update_fields(&self, update: ProjectUpdate) -> Result<UpdateReport, StoreError> {
        let ProjectUpdate {
            id,
            fields,
            skipped,
        } = update;

        for skip in &skipped {
            tracing::warn!(id, field = %skip.field, reason = %skip.reason, "skipping field update");
        }

        let _guard = self.write_lock.lock().await;
        let mut records = self.local.read().await?.records;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::repository_not_found(id))?;

        let mut applied = Vec::with_capacity(fields.len());
        for field in fields {
            applied.push(field.name().to_string());
            field.apply(record);
        }

        self.local.write(&records).await?;
        tracing::info!(id, applied = ?applied, "updated repository");

        Ok(UpdateReport {
            id,
            applied,
            skipped,
        })
    }

    /// Replace only the image reference of one record.
    ///
    /// # Errors
    ///
    /// As [`Self::update_fields`].
    pub async fn update_image(
        &self,
        id: u64,
        image: impl Into<String>,
    ) -> Result<UpdateReport, StoreError> {
        self.update_fields(ProjectUpdate::image(id, image)).await
    }

    /// Delete the whole local document. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be removed.
    pub async fn clear(&self) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let existed = self.local.clear().await?;
        tracing::info!(existed, path = %self.local.path().display(), "cleared local document");
        Ok(existed)
    }
}

/// Carry cached images onto freshly fetched records, matching by `id` only.
///
/// A fresh record whose id is cached takes the cached image (or
/// `default_image` if the cached one is empty). Any other fresh record keeps
/// the image it arrived with. Every other field comes from `fresh`.
#[must_use]
pub fn merge_images(
    fresh: Vec<Repository>,
    cached: &[Repository],
    default_image: &str,
) -> Vec<Repository> {
    let images: HashMap<u64, &str> = cached.iter().map(|r| (r.id, r.image.as_str())).collect();

    fresh
        .into_iter()
        .map(|mut repo| {
            let cached = images.get(&repo.id).copied();
            carry_image(&mut repo, cached, default_image);
            repo
        })
        .collect()
}

fn carry_image(repo: &mut Repository, cached: Option<&str>, default_image: &str) {
    match cached {
        Some("") => repo.image = default_image.to_string(),
        Some(image) => repo.image = image.to_string(),
        None => {}
    }
}

fn log_remote_failure(operation: &str, error: &GithubError) {
    tracing::warn!(
        operation,
        status = ?error.status(),
        payload = ?error.payload(),
        %error,
        "remote fetch failed; serving cached repositories"
    );
}
