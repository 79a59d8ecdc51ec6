//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::CoreError;
use folio_store::StoreError;
use serde_json::json;

/// Errors returned by the HTTP handlers.
///
/// Client mistakes carry their message back. Server-side failures are logged
/// with full detail and answered with a fixed message only.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body, missing `id`, invalid repository name.
    BadRequest(String),
    /// No record with the requested id or name.
    NotFound(String),
    /// Local document failure; `message` is what the client sees.
    Internal { message: &'static str },
}

impl ApiError {
    /// Map a store error, using `public_message` for anything server-side.
    pub fn from_store(error: StoreError, public_message: &'static str) -> Self {
        match error {
            StoreError::Core(CoreError::Validation(message)) => Self::BadRequest(message),
            StoreError::Core(not_found @ CoreError::NotFound { .. }) => {
                Self::NotFound(not_found.to_string())
            }
            other => {
                tracing::error!(error = %other, "request failed");
                Self::Internal {
                    message: public_message,
                }
            }
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Internal { message } => message.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
