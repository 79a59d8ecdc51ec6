//! Cross-cutting error types for Folio.
//!
//! Domain-specific errors (`GithubError`, `StoreError`) are defined in their
//! respective crates. They converge in `folio-server`, where each one is
//! mapped to an HTTP status.

use thiserror::Error;

/// Errors that can be raised by any Folio crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Inbound data failed validation (missing identifier, malformed payload).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing repository record.
    pub fn repository_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "repository".to_string(),
            id: id.to_string(),
        }
    }
}
