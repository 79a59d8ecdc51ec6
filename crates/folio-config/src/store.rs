//! Local document configuration.

use std::path::PathBuf;

use folio_core::DEFAULT_IMAGE;
use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("datastore/projects.json")
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Location of the cached repository document.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Image reference given to records that have none of their own.
    #[serde(default = "default_image")]
    pub default_image: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            default_image: default_image(),
        }
    }
}
