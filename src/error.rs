//! Error types for the UNDO service
//!
//! Every failure a handler can surface maps to one of these variants, and
//! every variant renders as `{"error": "..."}` with a 400 or 500 status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Result type for UNDO operations
pub type Result<T> = std::result::Result<T, UndoError>;

#[derive(Debug, thiserror::Error)]
pub enum UndoError {
    /// Missing or malformed request fields
    #[error("{0}")]
    Validation(String),

    /// Private key is not 32 bytes of hex
    #[error("Invalid private key")]
    InvalidKey,

    /// Node rejected an announced payload; `body` is the node's response verbatim
    #[error("Transaction failed: {body}")]
    SubmissionFailed { status: u16, body: String },

    /// Node or indexer unreachable, or answered with an unexpected status
    #[error("{0}")]
    UpstreamUnavailable(String),
}

impl UndoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        UndoError::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        UndoError::UpstreamUnavailable(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UndoError::Validation(_) | UndoError::InvalidKey => StatusCode::BAD_REQUEST,
            UndoError::SubmissionFailed { .. } | UndoError::UpstreamUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for UndoError {
    fn from(e: reqwest::Error) -> Self {
        UndoError::UpstreamUnavailable(format!("Node request failed: {e}"))
    }
}

impl From<serde_json::Error> for UndoError {
    fn from(e: serde_json::Error) -> Self {
        UndoError::UpstreamUnavailable(format!("Unexpected node response: {e}"))
    }
}

impl IntoResponse for UndoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("Rejected request: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            UndoError::validation("Missing address").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(UndoError::InvalidKey.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UndoError::upstream("down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_submission_failure_keeps_node_body() {
        let body = r#"{"code":"InvalidArgument","message":"bad deadline"}"#;
        let err = UndoError::SubmissionFailed {
            status: 409,
            body: body.to_string(),
        };
        assert!(err.to_string().contains(body));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
