//! Repository listing and lookup against the GitHub REST API.

use folio_core::{Owner, Repository};

use crate::{GithubClient, error::GithubError, http::check_response};

#[derive(serde::Deserialize)]
struct GithubRepo {
    id: u64,
    name: String,
    description: Option<String>,
    #[serde(default)]
    private: bool,
    html_url: Option<String>,
    owner: Option<GithubOwner>,
    created_at: Option<String>,
    updated_at: Option<String>,
    pushed_at: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    language: Option<String>,
    /// Never sent by GitHub; honored when a proxy or fixture supplies one.
    image: Option<String>,
}

#[derive(serde::Deserialize)]
struct GithubOwner {
    login: Option<String>,
}

impl GithubRepo {
    fn into_repository(self, default_image: &str) -> Repository {
        Repository {
            id: self.id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            private: self.private,
            html_url: self.html_url.unwrap_or_default(),
            owner: Owner {
                login: self.owner.and_then(|o| o.login).unwrap_or_default(),
            },
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
            pushed_at: self.pushed_at.unwrap_or_default(),
            stargazers_count: self.stargazers_count,
            watchers_count: self.watchers_count,
            forks_count: self.forks_count,
            open_issues_count: self.open_issues_count,
            language: self.language.unwrap_or_default(),
            image: self
                .image
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| default_image.to_string()),
        }
    }
}

/// A repository slug may only contain ASCII alphanumerics, `-`, `_` and `.`.
pub(crate) fn validate_name(name: &str) -> Result<(), GithubError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(GithubError::InvalidName(name.to_string()))
    }
}

impl GithubClient {
    /// List the owner's public repositories (first page, up to 100).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] if the request fails, the API returns a
    /// non-success status, or the body cannot be decoded.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, GithubError> {
        let url = format!(
            "{}/users/{}/repos?per_page=100",
            self.api_base,
            urlencoding::encode(&self.owner)
        );
        tracing::debug!(%url, "listing repositories");
        let resp = check_response(self.http.get(&url).send().await?).await?;

        let data: Vec<GithubRepo> = resp.json().await?;
        let repos: Vec<Repository> = data
            .into_iter()
            .map(|r| r.into_repository(&self.default_image))
            .collect();
        tracing::debug!(count = repos.len(), owner = %self.owner, "fetched repositories");
        Ok(repos)
    }

    /// Fetch one repository by slug.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::InvalidName`] without making a request if `name`
    /// is not a valid slug; otherwise as [`Self::list_repositories`].
    pub async fn get_repository(&self, name: &str) -> Result<Repository, GithubError> {
        validate_name(name)?;
        let url = format!(
            "{}/repos/{}/{}",
            self.api_base,
            urlencoding::encode(&self.owner),
            urlencoding::encode(name)
        );
        tracing::debug!(%url, "fetching repository");
        let resp = check_response(self.http.get(&url).send().await?).await?;

        let data: GithubRepo = resp.json().await?;
        Ok(data.into_repository(&self.default_image))
    }
}
