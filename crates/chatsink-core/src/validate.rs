//! Batch validator: request DTO in, validated batch or field issues out.
//!
//! Total and side-effect-free -- never touches storage. Every violated
//! constraint is reported, not just the first, with dotted field paths
//! into the request body (`chatId`, `messages.3.messageId`, ...).

use chatsink_types::error::FieldIssue;
use chatsink_types::ingest::{ContentItem, IngestRequest, ValidBatch};
use uuid::Uuid;

/// Validate an ingestion request.
///
/// Rules: `chatId` must be a well-formed UUID; `messages` must be a
/// non-empty list; each item needs a well-formed UUID `messageId`, a
/// non-empty `type` (role), a non-empty `message` (display string), and a
/// non-empty `messageHtml`. Missing fields are reported as required, never
/// silently defaulted.
pub fn validate_request(request: &IngestRequest) -> Result<ValidBatch, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let chat_id = validate_uuid(request.chat_id.as_deref(), "chatId", &mut issues);

    let mut items = Vec::new();
    match request.messages.as_deref() {
        None | Some([]) => {
            issues.push(FieldIssue::new(
                "messages",
                "messages must contain at least one content item",
            ));
        }
        Some(dtos) => {
            for (i, dto) in dtos.iter().enumerate() {
                let message_id =
                    validate_uuid(dto.message_id.as_deref(), &format!("messages.{i}.messageId"), &mut issues);
                let role = validate_non_empty(
                    dto.role.as_deref(),
                    &format!("messages.{i}.type"),
                    "role is required",
                    &mut issues,
                );
                let display = validate_non_empty(
                    dto.message.as_deref(),
                    &format!("messages.{i}.message"),
                    "content must be a non-empty string",
                    &mut issues,
                );
                let html = validate_non_empty(
                    dto.message_html.as_deref(),
                    &format!("messages.{i}.messageHtml"),
                    "html string is required",
                    &mut issues,
                );

                if let (Some(message_id), Some(role), Some(display), Some(html)) =
                    (message_id, role, display, html)
                {
                    items.push(ContentItem {
                        message_id,
                        role,
                        display,
                        html,
                    });
                }
            }
        }
    }

    match (chat_id, issues.is_empty()) {
        (Some(chat_id), true) => Ok(ValidBatch { chat_id, items }),
        _ => Err(issues),
    }
}

fn validate_uuid(value: Option<&str>, field: &str, issues: &mut Vec<FieldIssue>) -> Option<Uuid> {
    let name = field.rsplit('.').next().unwrap_or(field);
    match value {
        None => {
            issues.push(FieldIssue::new(field, format!("{name} is required")));
            None
        }
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                issues.push(FieldIssue::new(field, format!("{name} must be a valid UUID")));
                None
            }
        },
    }
}

fn validate_non_empty(
    value: Option<&str>,
    field: &str,
    message: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match value {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            issues.push(FieldIssue::new(field, message));
            None
        }
    }
}
