//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Document not found under the docs directory.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Document name contains path traversal or other invalid parts.
    #[error("Invalid document name: {0}")]
    InvalidName(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::DocumentNotFound(name) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Document not found", "name": name}),
            ),
            Self::InvalidName(name) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid document name", "name": name}),
            ),
            Self::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
