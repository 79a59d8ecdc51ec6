//! End-to-end HTTP tests: folio router → GitHub client → local axum stub of GitHub.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use folio_config::GithubConfig;
use folio_core::{DEFAULT_IMAGE, Repository};
use folio_github::GithubClient;
use folio_server::build_router;
use folio_store::{LocalStore, ProjectStore};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

async fn stub_list(State(down): State<Arc<AtomicBool>>) -> impl IntoResponse {
    if down.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "unavailable"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!([
            {"id": 1, "name": "repo1-renamed", "owner": {"login": "octocat"}, "stargazers_count": 3},
            {"id": 2, "name": "repo2", "owner": {"login": "octocat"}, "language": "Go"}
        ])),
    )
}

async fn stub_get(
    State(down): State<Arc<AtomicBool>>,
    Path((_, name)): Path<(String, String)>,
) -> impl IntoResponse {
    if down.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
    }
    let id = if name == "repo2" { 2 } else { 3 };
    (
        StatusCode::OK,
        Json(json!({"id": id, "name": name, "owner": {"login": "octocat"}})),
    )
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve") });
    format!("http://{addr}")
}

struct Harness {
    _dir: TempDir,
    document: PathBuf,
    github_down: Arc<AtomicBool>,
    base: String,
    http: reqwest::Client,
}

impl Harness {
    async fn start(seed: &[Repository]) -> Self {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("projects.json");
        Self::start_at(dir, document, seed).await
    }

    async fn start_at(dir: TempDir, document: PathBuf, seed: &[Repository]) -> Self {
        let local = LocalStore::new(&document);
        if !seed.is_empty() {
            local.write(seed).await.unwrap();
        }

        let github_down = Arc::new(AtomicBool::new(false));
        let github = serve(
            Router::new()
                .route("/users/{owner}/repos", get(stub_list))
                .route("/repos/{owner}/{name}", get(stub_get))
                .with_state(github_down.clone()),
        )
        .await;

        let config = GithubConfig {
            owner: "octocat".to_string(),
            api_base: github,
            ..GithubConfig::default()
        };
        let source = GithubClient::new(&config, DEFAULT_IMAGE).unwrap();
        let store = Arc::new(ProjectStore::new(source, local, DEFAULT_IMAGE));
        let base = serve(build_router(store)).await;

        Self {
            _dir: dir,
            document,
            github_down,
            base,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    fn document_bytes(&self) -> Option<Vec<u8>> {
        std::fs::read(&self.document).ok()
    }

    async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self.http.put(self.url(path)).json(body).send().await.unwrap();
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
        (status, resp.json().await.unwrap())
    }
}

fn seed() -> Vec<Repository> {
    let mut repo1 = Repository::new(1, "repo1").with_image("/custom.png");
    repo1.stargazers_count = 7;
    vec![repo1]
}

#[tokio::test]
async fn list_syncs_and_keeps_curated_image() {
    let h = Harness::start(&seed()).await;

    let resp = h.http.get(h.url("/api/projects")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["x-folio-freshness"], "fresh");

    let records: Vec<Repository> = resp.json().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "repo1-renamed");
    assert_eq!(records[0].image, "/custom.png");
    assert_eq!(records[1].image, DEFAULT_IMAGE);

    let stored: Vec<Repository> = serde_json::from_slice(&h.document_bytes().unwrap()).unwrap();
    assert_eq!(stored, records);
}

#[tokio::test]
async fn list_serves_cache_when_github_is_down() {
    let h = Harness::start(&seed()).await;
    h.github_down.store(true, Ordering::SeqCst);
    let before = h.document_bytes();

    let resp = h.http.get(h.url("/api/projects")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()["x-folio-freshness"], "stale");

    let records: Vec<Repository> = resp.json().await.unwrap();
    assert_eq!(records, seed());
    assert_eq!(h.document_bytes(), before);
}

#[tokio::test]
async fn local_failure_is_a_generic_500() {
    let dir = TempDir::new().unwrap();
    // The document path is a directory, so reading it fails.
    let document = dir.path().to_path_buf();
    let h = Harness::start_at(dir, document, &[]).await;

    let resp = h.http.get(h.url("/api/projects")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Failed to fetch projects"}));
}

#[tokio::test]
async fn update_without_id_is_400_and_writes_nothing() {
    let h = Harness::start(&seed()).await;
    let before = h.document_bytes();

    let (status, body) = h.put("/api/projects/update", &json!({"name": "x"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("'id'"));
    assert_eq!(h.document_bytes(), before);
}

#[tokio::test]
async fn update_skips_mismatched_field_and_succeeds() {
    let h = Harness::start(&seed()).await;

    let (status, body) = h
        .put(
            "/api/projects/update",
            &json!({"id": 1, "stargazers_count": "not-a-number", "language": "Rust"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project File Updated");
    assert_eq!(body["applied"], json!(["language"]));
    assert_eq!(body["skipped"][0]["field"], "stargazers_count");

    let stored: Vec<Repository> = serde_json::from_slice(&h.document_bytes().unwrap()).unwrap();
    assert_eq!(stored[0].stargazers_count, 7);
    assert_eq!(stored[0].language, "Rust");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let h = Harness::start(&seed()).await;
    let (status, _) = h
        .put("/api/projects/update", &json!({"id": 404, "name": "ghost"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_with_malformed_body_is_400() {
    let h = Harness::start(&seed()).await;
    let resp = h
        .http
        .put(h.url("/api/projects/update"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn image_update_survives_next_sync() {
    let h = Harness::start(&seed()).await;
    h.http.get(h.url("/api/projects")).send().await.unwrap();

    let (status, body) = h
        .put("/api/projects/image", &json!({"id": 2, "image": "/go.svg"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Project Image Updated");

    let records: Vec<Repository> = h
        .http
        .get(h.url("/api/projects"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records[1].image, "/go.svg");
}

#[tokio::test]
async fn image_update_requires_a_string() {
    let h = Harness::start(&seed()).await;
    let (status, _) = h
        .put("/api/projects/image", &json!({"id": 1, "image": 5}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_single_project() {
    let h = Harness::start(&seed()).await;
    let resp = h.http.get(h.url("/api/projects/repo2")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let repo: Repository = resp.json().await.unwrap();
    assert_eq!(repo.id, 2);
}

#[tokio::test]
async fn projects_named_like_update_routes_are_still_readable() {
    let h = Harness::start(&seed()).await;
    for name in ["update", "image"] {
        let resp = h
            .http
            .get(h.url(&format!("/api/projects/{name}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200, "GET /api/projects/{name}");
        let repo: Repository = resp.json().await.unwrap();
        assert_eq!(repo.name, name);
    }
}

#[tokio::test]
async fn get_unknown_project_while_down_is_404() {
    let h = Harness::start(&seed()).await;
    h.github_down.store(true, Ordering::SeqCst);
    let resp = h.http.get(h.url("/api/projects/nope")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_clears_the_document() {
    let h = Harness::start(&seed()).await;
    let resp = h.http.delete(h.url("/api/projects")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Project File Deleted");
    assert!(h.document_bytes().is_none());
}

#[tokio::test]
async fn health_is_ok() {
    let h = Harness::start(&[]).await;
    let body: Value = h
        .http
        .get(h.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}
