//! Errors raised while loading or validating Folio configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `FOLIO_*` variable could not be parsed into [`crate::FolioConfig`].
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section the command needs is empty, e.g. `github` without an owner.
    #[error("'{section}' is not configured; set it in .folio/config.toml or FOLIO_* env")]
    NotConfigured { section: String },

    /// A value is present but unusable, e.g. `server.bind` that is not a socket address.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
