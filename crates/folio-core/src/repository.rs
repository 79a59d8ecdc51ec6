use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder image for records that have not been given one locally.
pub const DEFAULT_IMAGE: &str = "./src/assets/questionmark.svg";

/// Owner of a repository. Nested the same way the hosting API nests it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Owner {
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub login: String,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One source-code project surfaced by the portfolio.
///
/// Every field except `image` is sourced from the remote API and is replaced on
/// each sync. `image` is curated locally and survives re-sync as long as the
/// `id` stays the same.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Repository {
    /// Stable identifier; the only key used to correlate fresh and cached records.
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<bool>")]
    pub private: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<Owner>")]
    pub owner: Owner,
    /// ISO-8601 creation timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub pushed_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<u64>")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<u64>")]
    pub watchers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<u64>")]
    pub forks_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<u64>")]
    pub open_issues_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub image: String,
}

impl Repository {
    /// A record with the given identity and every other field defaulted.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            private: false,
            html_url: String::new(),
            owner: Owner::default(),
            created_at: String::new(),
            updated_at: String::new(),
            pushed_at: String::new(),
            stargazers_count: 0,
            watchers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            language: String::new(),
            image: DEFAULT_IMAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_optional_fields_default() {
        let repo: Repository = serde_json::from_str(r#"{"id": 7, "name": "goAdvent"}"#).unwrap();
        assert_eq!(repo.id, 7);
        assert_eq!(repo.description, "");
        assert_eq!(repo.owner.login, "");
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.image, "");
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let repo: Repository = serde_json::from_str(
            r#"{"id": 1, "name": "repo1", "description": null, "private": null,
                "owner": {"login": null}, "pushed_at": null, "forks_count": null,
                "image": "/custom.png"}"#,
        )
        .unwrap();
        assert_eq!(repo.description, "");
        assert!(!repo.private);
        assert_eq!(repo.owner.login, "");
        assert_eq!(repo.pushed_at, "");
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.image, "/custom.png");
    }

    #[test]
    fn serializes_owner_as_nested_object() {
        let mut repo = Repository::new(1, "repo1");
        repo.owner.login = "octocat".to_string();
        let value = serde_json::to_value(&repo).unwrap();
        assert_eq!(value["owner"]["login"], "octocat");
        assert_eq!(value["image"], DEFAULT_IMAGE);
    }

    #[test]
    fn with_image_overrides_placeholder() {
        let repo = Repository::new(1, "repo1").with_image("/custom.png");
        assert_eq!(repo.image, "/custom.png");
    }
}
