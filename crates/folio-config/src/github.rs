//! GitHub API configuration.

use serde::{Deserialize, Serialize};

/// Default REST API base.
fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("folio/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Account whose public repositories are listed (e.g., `octocat`).
    #[serde(default)]
    pub owner: String,

    /// REST API base URL. Overridden in tests to point at a local stub.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header; GitHub rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl GithubConfig {
    /// Returns `true` if an owner handle is set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.owner.is_empty()
    }
}
