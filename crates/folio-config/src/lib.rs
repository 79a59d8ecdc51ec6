//! # folio-config
//!
//! Layered configuration loading for Folio using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FOLIO_*` prefix, `__` as separator)
//! 2. Project-level `.folio/config.toml`
//! 3. User-level `~/.config/folio/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FOLIO_GITHUB__OWNER` -> `github.owner`, `FOLIO_STORE__PATH` -> `store.path`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::load_with_dotenv().expect("config");
//! config.validate().expect("usable config");
//! println!("caching to {}", config.store.path.display());
//! ```

mod error;
mod github;
mod server;
mod store;

pub use error::ConfigError;
pub use github::GithubConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

use std::net::SocketAddr;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl FolioConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".folio/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("FOLIO_").split("__"))
    }

    /// Check that the loaded values are usable for serving or syncing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if no GitHub owner is set and
    /// [`ConfigError::InvalidValue`] for an unparseable bind address or a zero
    /// timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.github.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "github".to_string(),
            });
        }
        if self.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "github.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        self.bind_addr()?;
        Ok(())
    }

    /// The listener address parsed from `server.bind`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                reason: e.to_string(),
            })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }
}
