//! Application error type mapping the ingestion taxonomy to HTTP responses.
//!
//! Shape and content errors carry caller detail (per-field issues) and map
//! to 400. Storage errors are logged server-side with full context and
//! surfaced as an opaque 500; internal detail never reaches the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatsink_types::error::IngestError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Ingestion pipeline errors (validation, content, storage).
    Ingest(IngestError),
    /// Requested entity does not exist.
    NotFound(&'static str),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        AppError::Ingest(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Ingest(IngestError::Validation(issues)) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation error",
                    "issues": issues,
                }),
            ),
            AppError::Ingest(IngestError::Content(err)) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": "Validation error",
                    "issues": [{ "field": "messages", "message": err.to_string() }],
                }),
            ),
            AppError::Ingest(IngestError::Storage(err)) => {
                tracing::error!(error = %err, "storage failure while processing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "An error occurred while processing your request",
                    }),
                )
            }
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                json!({
                    "success": false,
                    "message": format!("{what} not found"),
                }),
            ),
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
