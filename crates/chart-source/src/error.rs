// File: crates/chart-source/src/error.rs
// Summary: Error type for backend requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or TLS failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{detail} (status {status})")]
    Status { status: u16, detail: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Message for a failed response: the JSON `detail` field when present,
/// otherwise `HTTP <status>`.
pub fn error_detail(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .filter(|d| !d.is_null());
    match detail {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        Some(serde_json::Value::String(_)) | None => format!("HTTP {status}"),
        Some(other) => other.to_string(),
    }
}
