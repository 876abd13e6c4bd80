use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// One violated constraint in a request payload.
///
/// `field` is a dotted path into the request body, e.g. `chatId` or
/// `messages.3.messageId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A content item's HTML is missing or empty at normalization time.
///
/// Distinct from request-shape validation, but still a caller error:
/// it is detected before any write and aborts the whole batch.
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("message with ID {message_id} is missing 'messageHtml'")]
    MissingHtml { message_id: Uuid },
}

/// Errors from repository operations (used by trait definitions in chatsink-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Aggregate error for the ingestion pipeline.
///
/// Each variant is a distinct caller-visible outcome category:
/// validation and content errors carry caller detail; storage errors are
/// logged server-side and surfaced opaquely.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("validation error")]
    Validation(Vec<FieldIssue>),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_names_offending_item() {
        let id = Uuid::new_v4();
        let err = ContentError::MissingHtml { message_id: id };
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_ingest_error_from_storage() {
        let err: IngestError = RepositoryError::Connection.into();
        assert!(matches!(err, IngestError::Storage(_)));
    }

    #[test]
    fn test_field_issue_serializes() {
        let issue = FieldIssue::new("chatId", "chatId must be a valid UUID");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["field"], "chatId");
    }
}
