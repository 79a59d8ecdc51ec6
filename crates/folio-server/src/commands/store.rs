use anyhow::Context;
use folio_config::FolioConfig;
use folio_github::GithubClient;
use folio_store::{LocalStore, ProjectStore};

/// Build the project store described by `config`.
pub fn open(config: &FolioConfig) -> anyhow::Result<ProjectStore<GithubClient>> {
    let source = GithubClient::new(&config.github, config.store.default_image.clone())
        .context("failed to build GitHub client")?;
    let local = LocalStore::new(config.store.path.clone());
    Ok(ProjectStore::new(
        source,
        local,
        config.store.default_image.clone(),
    ))
}
