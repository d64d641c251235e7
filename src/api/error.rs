//! API error types for the task-management REST client.

use std::fmt;

use thiserror::Error;

/// API-specific error type for the task-management REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid request parameters (400)
    #[error("Bad request: {0}")]
    BadRequest(ErrorResponse),

    /// Missing or rejected credentials (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorResponse),

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(ErrorResponse),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(ErrorResponse),

    /// Resource already exists (409)
    #[error("Conflict: {0}")]
    Conflict(ErrorResponse),

    /// Too many requests (429)
    #[error("Rate limited: {0}")]
    RateLimited(ErrorResponse),

    /// Server-side error (5xx)
    #[error("Server error: {0}")]
    ServerError(ErrorResponse),

    /// Unexpected HTTP status code
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, ErrorResponse),

    /// JSON deserialization error
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// HTTP status code carried by this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::RateLimited(_) => Some(429),
            ApiError::ServerError(r) => r.status_code,
            ApiError::UnexpectedStatus(code, _) => Some(*code),
            ApiError::Deserialize(_) | ApiError::InvalidParameter(_) => None,
        }
    }

    /// Server-provided error body, if any.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::BadRequest(r)
            | ApiError::Unauthorized(r)
            | ApiError::Forbidden(r)
            | ApiError::NotFound(r)
            | ApiError::Conflict(r)
            | ApiError::RateLimited(r)
            | ApiError::ServerError(r)
            | ApiError::UnexpectedStatus(_, r) => Some(r),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response format from the API.
///
/// Text fields accept strings, numbers or lists of strings, so bodies such as
/// `{"statusCode": 400, "error": "Bad Request", "message": ["title required"]}`
/// still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ErrorResponse {
    /// Error status (e.g. "error" or a numeric code)
    #[serde(default, deserialize_with = "lenient_text::deserialize")]
    pub status: Option<String>,
    /// Human-readable error message
    #[serde(default, alias = "msg", deserialize_with = "lenient_text::deserialize")]
    pub message: Option<String>,
    /// Short error label (e.g. "Bad Request")
    #[serde(default, deserialize_with = "lenient_text::deserialize")]
    pub error: Option<String>,
    /// Additional error details
    #[serde(default, deserialize_with = "lenient_text::deserialize")]
    pub details: Option<String>,
    /// HTTP status code the body arrived with. Not part of the wire format.
    #[serde(skip)]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    /// Wrap a non-JSON (or unrecognised) body as the error message.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Default::default()
        }
    }

    /// Get the error message, preferring `message`, then `error`, then `details`.
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| self.details.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    /// Whether the body carried any human-readable text.
    pub fn has_message(&self) -> bool {
        self.message.is_some() || self.error.is_some() || self.details.is_some()
    }

    pub(crate) fn with_status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_message())
    }
}

/// Reads a JSON string, number, bool or list of those as optional text.
mod lenient_text {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(to_text))
    }

    fn to_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Array(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(to_text).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}
