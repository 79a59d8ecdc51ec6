//! GitHub source error types.

use thiserror::Error;

/// Errors from the remote repository source.
///
/// Transport failures and non-success responses are the same error kind so
/// callers can fall back uniformly. Use [`GithubError::status`] and
/// [`GithubError::payload`] to inspect what the remote said, if anything.
#[derive(Debug, Error)]
pub enum GithubError {
    /// DNS, connection, timeout, or body decoding failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Canonical reason phrase for the status.
        message: String,
        /// Response body, if it was valid JSON.
        payload: Option<serde_json::Value>,
    },

    /// The API refused the request because the rate limit is exhausted.
    #[error("rate limited ({status}), retry after {retry_after_secs}s")]
    RateLimited {
        /// 429, or 403 with an exhausted `x-ratelimit-remaining`.
        status: u16,
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The repository name is empty or not a valid slug. No request was made.
    #[error("invalid repository name: {0:?}")]
    InvalidName(String),
}

impl GithubError {
    /// HTTP status reported by the remote, when there was a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Api { status, .. } | Self::RateLimited { status, .. } => Some(*status),
            Self::InvalidName(_) => None,
        }
    }

    /// Raw error payload returned by the remote, when it was JSON.
    #[must_use]
    pub const fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}
