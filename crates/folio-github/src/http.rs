//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (rate limiting with `Retry-After` parsing,
//! non-success → [`GithubError::Api`] with the JSON error body) so the
//! request functions stay focused on URL construction and response mapping.

use reqwest::StatusCode;

use crate::error::GithubError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429**, or **403** with `x-ratelimit-remaining: 0` → [`GithubError::RateLimited`]
///   (falls back to 60 s if `Retry-After` is absent or unparseable).
/// - **Non-success status** → [`GithubError::Api`] with the status, its reason
///   phrase, and the body if it parses as JSON.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    let status = resp.status();
    if is_rate_limited(&resp) {
        return Err(GithubError::RateLimited {
            status: status.as_u16(),
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        let payload = resp
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str(&body).ok());
        return Err(GithubError::Api {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
            payload,
        });
    }
    Ok(resp)
}

fn is_rate_limited(resp: &reqwest::Response) -> bool {
    match resp.status() {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::FORBIDDEN => resp
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0"),
        _ => false,
    }
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
