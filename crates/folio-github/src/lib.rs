//! # folio-github
//!
//! Remote repository source for Folio.
//!
//! Lists and looks up an owner's repositories on the GitHub REST API and
//! normalizes them into [`folio_core::Repository`]. The source is a pure read:
//! it never touches the local cache. Callers chain the cache write themselves.

mod error;
mod http;
mod repos;

pub use error::GithubError;

use std::future::Future;
use std::time::Duration;

use folio_config::GithubConfig;
use folio_core::Repository;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Where repository records come from.
///
/// Implemented by [`GithubClient`]; tests substitute in-memory fakes.
pub trait RepositorySource: Send + Sync {
    /// Every repository of the configured owner.
    fn list(&self) -> impl Future<Output = Result<Vec<Repository>, GithubError>> + Send;

    /// One repository by slug.
    fn get(&self, name: &str) -> impl Future<Output = Result<Repository, GithubError>> + Send;
}

/// HTTP client for the GitHub repositories API.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    default_image: String,
}

impl GithubClient {
    /// Build a client from configuration.
    ///
    /// `default_image` is assigned to every fetched record; GitHub has no
    /// notion of a portfolio image.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Transport`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &GithubConfig, default_image: impl Into<String>) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            default_image: default_image.into(),
        })
    }

    /// The account whose repositories are listed.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl RepositorySource for GithubClient {
    async fn list(&self) -> Result<Vec<Repository>, GithubError> {
        self.list_repositories().await
    }

    async fn get(&self, name: &str) -> Result<Repository, GithubError> {
        self.get_repository(name).await
    }
}
