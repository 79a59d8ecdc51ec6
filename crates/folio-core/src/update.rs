//! Typed field updates for repository records.
//!
//! An inbound JSON payload is validated once, at the boundary, into a
//! [`ProjectUpdate`]: the target `id` plus one [`ProjectField`] per accepted
//! key. Keys that are unknown or carry a value of the wrong type become
//! [`SkippedField`]s and never touch the stored record.
//!
//! `null` is always accepted and resets the field to its default (empty text,
//! zero, `false`, or the placeholder image).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::repository::{Owner, Repository};

/// One mutable field of a [`Repository`], carrying a correctly typed value.
///
/// `id` has no variant: it addresses the record and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectField {
    Name(String),
    Description(String),
    Private(bool),
    HtmlUrl(String),
    Owner(Owner),
    CreatedAt(String),
    UpdatedAt(String),
    PushedAt(String),
    StargazersCount(u64),
    WatchersCount(u64),
    ForksCount(u64),
    OpenIssuesCount(u64),
    Language(String),
    Image(String),
}

impl ProjectField {
    /// The JSON key this field is persisted under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Description(_) => "description",
            Self::Private(_) => "private",
            Self::HtmlUrl(_) => "html_url",
            Self::Owner(_) => "owner",
            Self::CreatedAt(_) => "created_at",
            Self::UpdatedAt(_) => "updated_at",
            Self::PushedAt(_) => "pushed_at",
            Self::StargazersCount(_) => "stargazers_count",
            Self::WatchersCount(_) => "watchers_count",
            Self::ForksCount(_) => "forks_count",
            Self::OpenIssuesCount(_) => "open_issues_count",
            Self::Language(_) => "language",
            Self::Image(_) => "image",
        }
    }

    /// Overwrite the matching field on `repo`.
    pub fn apply(self, repo: &mut Repository) {
        match self {
            Self::Name(v) => repo.name = v,
            Self::Description(v) => repo.description = v,
            Self::Private(v) => repo.private = v,
            Self::HtmlUrl(v) => repo.html_url = v,
            Self::Owner(v) => repo.owner = v,
            Self::CreatedAt(v) => repo.created_at = v,
            Self::UpdatedAt(v) => repo.updated_at = v,
            Self::PushedAt(v) => repo.pushed_at = v,
            Self::StargazersCount(v) => repo.stargazers_count = v,
            Self::WatchersCount(v) => repo.watchers_count = v,
            Self::ForksCount(v) => repo.forks_count = v,
            Self::OpenIssuesCount(v) => repo.open_issues_count = v,
            Self::Language(v) => repo.language = v,
            Self::Image(v) => repo.image = v,
        }
    }

    /// Parse one payload entry. The error string is the skip reason.
    fn from_json(key: &str, value: &Value, default_image: &str) -> Result<Self, String> {
        match key {
            "name" => match value {
                Value::String(s) if !s.is_empty() => Ok(Self::Name(s.clone())),
                Value::String(_) | Value::Null => Err("name must be non-empty".to_string()),
                other => Err(mismatch("string", other)),
            },
            "description" => text(value).map(Self::Description),
            "private" => flag(value).map(Self::Private),
            "html_url" => text(value).map(Self::HtmlUrl),
            "owner" => owner(value).map(Self::Owner),
            "created_at" => timestamp(value).map(Self::CreatedAt),
            "updated_at" => timestamp(value).map(Self::UpdatedAt),
            "pushed_at" => timestamp(value).map(Self::PushedAt),
            "stargazers_count" => count(value).map(Self::StargazersCount),
            "watchers_count" => count(value).map(Self::WatchersCount),
            "forks_count" => count(value).map(Self::ForksCount),
            "open_issues_count" => count(value).map(Self::OpenIssuesCount),
            "language" => text(value).map(Self::Language),
            "image" => match value {
                Value::Null => Ok(Self::Image(default_image.to_string())),
                other => text(other).map(Self::Image),
            },
            _ => Err("unknown field".to_string()),
        }
    }
}

/// A payload entry that was not applied, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedField {
    pub field: String,
    pub reason: String,
}

/// A validated partial update addressed to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Identifier of the record to update.
    pub id: u64,
    /// Fields that passed validation, ordered by key.
    pub fields: Vec<ProjectField>,
    /// Payload entries rejected during validation.
    pub skipped: Vec<SkippedField>,
}

impl ProjectUpdate {
    /// Validate an inbound JSON payload.
    ///
    /// `default_image` is what a `null` image resets to.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the payload is not a JSON object or
    /// its `id` is missing or not a non-negative integer. Field-level problems
    /// never fail the whole update; they are collected in `skipped`.
    pub fn from_json(payload: &Value, default_image: &str) -> Result<Self, CoreError> {
        let Value::Object(map) = payload else {
            return Err(CoreError::Validation(format!(
                "update payload must be a JSON object, got {}",
                json_type(payload)
            )));
        };

        let id = match map.get("id") {
            None | Some(Value::Null) => {
                return Err(CoreError::Validation(
                    "update payload is missing required field 'id'".to_string(),
                ));
            }
            Some(value) => value.as_u64().ok_or_else(|| {
                CoreError::Validation(format!(
                    "'id' must be a non-negative integer, got {}",
                    json_type(value)
                ))
            })?,
        };

        let mut fields = Vec::new();
        let mut skipped = Vec::new();
        for (key, value) in map.iter().filter(|(key, _)| key.as_str() != "id") {
            match ProjectField::from_json(key, value, default_image) {
                Ok(field) => fields.push(field),
                Err(reason) => skipped.push(SkippedField {
                    field: key.clone(),
                    reason,
                }),
            }
        }

        Ok(Self {
            id,
            fields,
            skipped,
        })
    }

    /// An update that only replaces the image reference.
    #[must_use]
    pub fn image(id: u64, image: impl Into<String>) -> Self {
        ProjectUpdateBuilder::new(id).image(image).build()
    }

    /// Names of the fields that will be applied.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(ProjectField::name).collect()
    }
}

/// Builds a [`ProjectUpdate`] in code, bypassing JSON validation.
pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(ProjectUpdate {
            id,
            fields: Vec::new(),
            skipped: Vec::new(),
        })
    }

    #[must_use]
    pub fn field(mut self, field: ProjectField) -> Self {
        self.0.fields.push(field);
        self
    }

    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.field(ProjectField::Name(name.into()))
    }

    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.field(ProjectField::Description(description.into()))
    }

    #[must_use]
    pub fn language(self, language: impl Into<String>) -> Self {
        self.field(ProjectField::Language(language.into()))
    }

    #[must_use]
    pub fn image(self, image: impl Into<String>) -> Self {
        self.field(ProjectField::Image(image.into()))
    }

    #[must_use]
    pub fn stargazers_count(self, count: u64) -> Self {
        self.field(ProjectField::StargazersCount(count))
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}

fn text(value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch("string", other)),
    }
}

fn flag(value: &Value) -> Result<bool, String> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch("boolean", other)),
    }
}

fn count(value: &Value) -> Result<u64, String> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| mismatch("non-negative integer", value)),
        other => Err(mismatch("non-negative integer", other)),
    }
}

fn timestamp(value: &Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) if is_iso8601(s) => Ok(s.clone()),
        Value::String(s) => Err(format!("invalid ISO-8601 timestamp '{s}'")),
        other => Err(mismatch("timestamp string", other)),
    }
}

/// RFC 3339, or a local date-time or plain date without an offset.
fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn owner(value: &Value) -> Result<Owner, String> {
    match value {
        Value::Null => Ok(Owner::default()),
        Value::Object(map) => match map.get("login") {
            Some(Value::String(login)) => Ok(Owner {
                login: login.clone(),
            }),
            None | Some(Value::Null) => Ok(Owner::default()),
            Some(other) => Err(mismatch("string login", other)),
        },
        other => Err(mismatch("object with 'login'", other)),
    }
}

fn mismatch(expected: &str, got: &Value) -> String {
    format!("type mismatch: expected {expected}, got {}", json_type(got))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::repository::DEFAULT_IMAGE;

    #[test]
    fn missing_id_is_a_validation_error() {
        let err = ProjectUpdate::from_json(&json!({"name": "x"}), DEFAULT_IMAGE).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("'id'"));
    }

    #[rstest]
    #[case(json!({"id": "1"}))]
    #[case(json!({"id": -4}))]
    #[case(json!({"id": 1.5}))]
    #[case(json!([1, 2]))]
    fn malformed_payloads_are_rejected(#[case] payload: Value) {
        let err = ProjectUpdate::from_json(&payload, DEFAULT_IMAGE).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn id_is_never_a_field() {
        let update = ProjectUpdate::from_json(&json!({"id": 3}), DEFAULT_IMAGE).unwrap();
        assert_eq!(update.id, 3);
        assert!(update.fields.is_empty());
        assert!(update.skipped.is_empty());
    }

    #[rstest]
    #[case("2025-07-08T17:46:57Z")]
    #[case("2025-07-08T17:46:57+02:00")]
    #[case("2025-07-08T17:46:57")]
    #[case("2025-07-08T17:46:57.250")]
    #[case("2025-07-08")]
    fn iso8601_timestamps_are_accepted(#[case] stamp: &str) {
        let update =
            ProjectUpdate::from_json(&json!({"id": 1, "pushed_at": stamp}), DEFAULT_IMAGE).unwrap();
        assert!(update.skipped.is_empty(), "{:?}", update.skipped);
        assert_eq!(update.fields, vec![ProjectField::PushedAt(stamp.to_string())]);
    }

    #[rstest]
    #[case("stargazers_count", json!("not-a-number"))]
    #[case("private", json!("yes"))]
    #[case("description", json!(12))]
    #[case("forks_count", json!(-1))]
    #[case("owner", json!("octocat"))]
    #[case("pushed_at", json!("yesterday"))]
    #[case("name", json!(""))]
    #[case("homepage", json!("https://example.com"))]
    fn bad_fields_are_skipped(#[case] key: &str, #[case] value: Value) {
        let mut payload = json!({"id": 1, "language": "Rust"});
        payload[key] = value;
        let update = ProjectUpdate::from_json(&payload, DEFAULT_IMAGE).unwrap();

        assert_eq!(update.field_names(), vec!["language"]);
        assert_eq!(update.skipped.len(), 1);
        assert_eq!(update.skipped[0].field, key);
    }

    #[test]
    fn null_resets_to_defaults() {
        let update = ProjectUpdate::from_json(
            &json!({"id": 1, "description": null, "stargazers_count": null, "image": null}),
            "/fallback.svg",
        )
        .unwrap();

        assert_eq!(
            update.fields,
            vec![
                ProjectField::Description(String::new()),
                ProjectField::Image("/fallback.svg".to_string()),
                ProjectField::StargazersCount(0),
            ]
        );
    }

    #[test]
    fn valid_fields_apply_to_record() {
        let update = ProjectUpdate::from_json(
            &json!({
                "id": 1,
                "name": "renamed",
                "owner": {"login": "octocat"},
                "pushed_at": "2025-07-08T17:46:57Z",
                "watchers_count": 9,
            }),
            DEFAULT_IMAGE,
        )
        .unwrap();

        let mut repo = Repository::new(1, "repo1");
        for field in update.fields {
            field.apply(&mut repo);
        }
        assert_eq!(repo.name, "renamed");
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.pushed_at, "2025-07-08T17:46:57Z");
        assert_eq!(repo.watchers_count, 9);
        assert_eq!(repo.id, 1);
    }

    #[test]
    fn builder_collects_fields_in_order() {
        let update = ProjectUpdateBuilder::new(5)
            .name("folio")
            .stargazers_count(3)
            .image("/a.png")
            .build();
        assert_eq!(update.id, 5);
        assert_eq!(update.field_names(), vec!["name", "stargazers_count", "image"]);
    }

    #[test]
    fn image_shorthand() {
        let update = ProjectUpdate::image(9, "/b.png");
        assert_eq!(update.fields, vec![ProjectField::Image("/b.png".to_string())]);
    }
}
