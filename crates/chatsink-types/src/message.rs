//! Message and normalized content types.
//!
//! A message's content is an ordered sequence of [`ContentPart`]s produced
//! by the normalizer -- structured, self-describing, and free of markup.
//! Raw HTML is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One normalized unit of message content.
///
/// Serializes internally tagged: `{ "type": "text", "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
}

impl ContentPart {
    /// Wrap plain text into a text part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }
}

/// A persisted chat message.
///
/// `id` is caller-supplied and globally unique across all chats.
/// `order` is the message's position within its chat's display order;
/// it and `created_at` are set at first insertion and never change on
/// content updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub role: String,
    pub content: Vec<ContentPart>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

/// Write payload for the message upsert.
///
/// Carries everything the insert path needs; the update path uses only
/// `id` and `content`. `order` and `created_at` are assigned by the
/// repository at insert time.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_part_serde_shape() {
        let part = ContentPart::text("Hello world");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Hello world");
    }

    #[test]
    fn test_content_part_deserialize() {
        let part: ContentPart =
            serde_json::from_str(r#"{"type":"text","text":"hi"}"#).unwrap();
        assert_eq!(part, ContentPart::text("hi"));
    }

    #[test]
    fn test_content_sequence_order_preserved() {
        let parts = vec![ContentPart::text("first"), ContentPart::text("second")];
        let json = serde_json::to_string(&parts).unwrap();
        let back: Vec<ContentPart> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parts);
    }
}
