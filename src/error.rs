// src/error.rs
//! Error taxonomy for the JobFinder client.
//!
//! Backend error bodies are JSON with an optional `detail` field; field
//! validation errors arrive as `{field: [message, ...]}`. Both get flattened
//! into a readable message so views can surface them verbatim.

use serde_json::Value;

/// The primary error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected locally, before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Credentials missing, expired or rejected after the refresh cycle.
    #[error("Authentication required. Please log in again.")]
    AuthRequired,

    /// Non-success status from the backend, with the flattened error body.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// Transport-level failure. Not retried automatically.
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Failure reading or writing the persisted session.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// True for errors that mean the session is no longer usable.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::AuthRequired)
    }
}

/// Flatten a backend error body into an `ApiError::Backend`.
///
/// Precedence mirrors the backend contract: a string `detail` (djoser) or
/// `error` field wins, then per-field message lists, then a generic fallback.
pub fn parse_error_body(status: u16, body: &str) -> ApiError {
    let detail = extract_detail(body)
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    ApiError::Backend { status, detail }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    for key in ["detail", "error", "message"] {
        if let Some(text) = map.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    // Field validation errors: {"email": ["Enter a valid email address."]}
    let mut parts = Vec::new();
    for (field, messages) in map {
        let Some(list) = messages.as_array() else {
            continue;
        };
        for message in list.iter().filter_map(Value::as_str) {
            parts.push(format!("{}: {}", field, message));
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
