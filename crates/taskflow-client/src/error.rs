//! Error Types
//!
//! Request errors are normalized to a `{detail, status_code?}` record so the
//! UI can show one string regardless of where the failure happened.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for every backend call
pub type ApiResult<T> = Result<T, ApiError>;

/// A failed backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{detail}")]
    Status { status_code: u16, detail: String },

    /// The request never produced a response (DNS, CORS, connection reset...).
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for banners
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Build the error for a non-2xx response from its raw body.
    ///
    /// FastAPI-style bodies carry `{"detail": ...}` where `detail` is either a
    /// string or a structured validation report.
    pub(crate) fn from_status(status_code: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status_code));

        ApiError::Status {
            status_code,
            detail,
        }
    }
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

/// The normalized error record (`{detail, status_code?}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            detail: err.detail(),
            status_code: err.status_code(),
        }
    }
}

/// Input rejected before any request was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Task title is required")]
    EmptyTitle,
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message is too long (max 2000 characters)")]
    MessageTooLong,
}

/// Errors from flows that validate first and then call the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_used_verbatim() {
        let err = ApiError::from_status(404, r#"{"detail":"Task not found"}"#);
        assert_eq!(err.detail(), "Task not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let body = r#"{"detail":[{"loc":["body","title"],"msg":"field required"}]}"#;
        let err = ApiError::from_status(422, body);
        assert!(err.detail().contains("field required"));
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn test_missing_detail_falls_back_to_status() {
        assert_eq!(
            ApiError::from_status(500, "Internal Server Error").detail(),
            "Request failed with status 500"
        );
        assert_eq!(
            ApiError::from_status(502, "").detail(),
            "Request failed with status 502"
        );
        assert_eq!(
            ApiError::from_status(400, r#"{"detail":""}"#).detail(),
            "Request failed with status 400"
        );
    }

    #[test]
    fn test_error_response_record() {
        let record = ErrorResponse::from(&ApiError::Network("connection refused".into()));
        assert_eq!(record.detail, "Network error: connection refused");
        assert_eq!(record.status_code, None);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("status_code").is_none());
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingCredentials.to_string(),
            "Email and password are required"
        );
        assert_eq!(
            ClientError::from(ValidationError::PasswordMismatch).to_string(),
            "Passwords do not match"
        );
    }
}
