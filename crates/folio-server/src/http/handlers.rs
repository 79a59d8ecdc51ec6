use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, Uri};
use axum::response::{IntoResponse, Response};
use folio_github::RepositorySource;
use folio_store::{Freshness, ProjectStore};
use serde_json::{Value, json};

use super::error::ApiError;

type SharedStore<S> = State<Arc<ProjectStore<S>>>;

const FRESHNESS_HEADER: HeaderName = HeaderName::from_static("x-folio-freshness");

pub(crate) async fn list_projects<S: RepositorySource>(
    State(store): SharedStore<S>,
) -> Result<Response, ApiError> {
    let outcome = store
        .sync()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch projects"))?;
    Ok(with_freshness(Json(outcome.records), outcome.freshness))
}

pub(crate) async fn get_project<S: RepositorySource>(
    State(store): SharedStore<S>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    fetch_project(&store, &name).await
}

/// `GET` on a path whose last segment is also an update route
/// (`/api/projects/update`, `/api/projects/image`).
pub(crate) async fn get_reserved_project<S: RepositorySource>(
    State(store): SharedStore<S>,
    uri: Uri,
) -> Result<Response, ApiError> {
    let name = uri.path().rsplit('/').next().unwrap_or_default();
    fetch_project(&store, name).await
}

async fn fetch_project<S: RepositorySource>(
    store: &ProjectStore<S>,
    name: &str,
) -> Result<Response, ApiError> {
    let (repo, freshness) = store
        .get(name)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch project"))?;
    Ok(with_freshness(Json(repo), freshness))
}

pub(crate) async fn update_project<S: RepositorySource>(
    State(store): SharedStore<S>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let report = store
        .update_from_json(&payload)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update project"))?;
    Ok(Json(json!({
        "message": "Project File Updated",
        "applied": report.applied,
        "skipped": report.skipped,
    })))
}

pub(crate) async fn update_image<S: RepositorySource>(
    State(store): SharedStore<S>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let id = payload
        .get("id")
        .and_then(Value::as_u64)
        .ok_or_else(|| ApiError::BadRequest("'id' must be a non-negative integer".to_string()))?;
    let image = payload
        .get("image")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("'image' must be a string".to_string()))?;

    store
        .update_image(id, image)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update project"))?;
    Ok(Json(json!({ "message": "Project Image Updated" })))
}

pub(crate) async fn clear_projects<S: RepositorySource>(
    State(store): SharedStore<S>,
) -> Result<Json<Value>, ApiError> {
    store
        .clear()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete project file"))?;
    Ok(Json(json!({ "message": "Project File Deleted" })))
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn with_freshness(body: impl IntoResponse, freshness: Freshness) -> Response {
    let value = match freshness {
        Freshness::Fresh => HeaderValue::from_static("fresh"),
        Freshness::Stale => HeaderValue::from_static("stale"),
    };
    let mut response = body.into_response();
    response.headers_mut().insert(FRESHNESS_HEADER, value);
    response
}
