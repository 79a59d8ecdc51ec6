//! HTTP facade over the project store.

mod error;
mod handlers;
mod request_tracing;

pub use error::ApiError;

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, put};
use folio_github::RepositorySource;
use folio_store::ProjectStore;

/// Build the API router around a shared store.
pub fn build_router<S>(store: Arc<ProjectStore<S>>) -> Router
where
    S: RepositorySource + 'static,
{
    Router::new()
        .route(
            "/api/projects",
            get(handlers::list_projects::<S>).delete(handlers::clear_projects::<S>),
        )
        .route(
            "/api/projects/update",
            get(handlers::get_reserved_project::<S>).put(handlers::update_project::<S>),
        )
        .route(
            "/api/projects/image",
            get(handlers::get_reserved_project::<S>).put(handlers::update_image::<S>),
        )
        .route("/api/projects/{name}", get(handlers::get_project::<S>))
        .route("/health", get(handlers::health))
        .layer(from_fn(request_tracing::request_tracing_middleware))
        .with_state(store)
}
