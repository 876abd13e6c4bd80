//! Wire DTOs and validated types for the batch ingestion endpoint.
//!
//! The request DTOs are deliberately loose (every field optional) so that
//! structural problems surface as per-field validation issues rather than
//! deserialization failures. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw ingestion request body: a chat id and a batch of content items.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub chat_id: Option<String>,
    pub messages: Option<Vec<ContentItemDto>>,
}

/// One incoming rich-text content item, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemDto {
    pub message_id: Option<String>,
    /// Display string shown alongside the message.
    pub message: Option<String>,
    /// Untrusted raw HTML; never persisted as-is.
    pub message_html: Option<String>,
    /// Role tag classifying the message's origin (wire name: `type`).
    #[serde(rename = "type")]
    pub role: Option<String>,
}

/// A batch that passed validation: well-formed ids, nothing empty.
#[derive(Debug, Clone)]
pub struct ValidBatch {
    pub chat_id: Uuid,
    pub items: Vec<ContentItem>,
}

/// A validated content item ready for normalization.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub message_id: Uuid,
    pub role: String,
    pub display: String,
    pub html: String,
}

/// Acknowledgement returned on successful ingestion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReceipt {
    pub chat_id: Uuid,
    /// Reference locator for the chat, e.g. `http://host/chat/{id}`.
    pub chat_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_missing_fields() {
        let req: IngestRequest = serde_json::from_str("{}").unwrap();
        assert!(req.chat_id.is_none());
        assert!(req.messages.is_none());
    }

    #[test]
    fn test_item_wire_names() {
        let item: ContentItemDto = serde_json::from_str(
            r#"{"messageId":"a","message":"b","messageHtml":"<p>c</p>","type":"user"}"#,
        )
        .unwrap();
        assert_eq!(item.message_id.as_deref(), Some("a"));
        assert_eq!(item.message_html.as_deref(), Some("<p>c</p>"));
        assert_eq!(item.role.as_deref(), Some("user"));
    }
}
