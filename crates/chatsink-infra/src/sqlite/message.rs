//! SQLite message repository implementation.
//!
//! The upsert is a single atomic statement: the insert path assigns the
//! next `order` within the chat and stamps `created_at`; the conflict path
//! updates only `content`. The writer pool's single connection serializes
//! writes, which keeps the `order` subselect race-free.

use chatsink_core::repository::MessageRepository;
use chatsink_types::error::RepositoryError;
use chatsink_types::message::{ContentPart, Message, NewMessage};
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

const UPSERT_SQL: &str = r#"INSERT INTO messages (id, chat_id, role, content, "order", created_at)
   VALUES (?, ?, ?, ?,
           (SELECT COALESCE(MAX("order") + 1, 0) FROM messages WHERE chat_id = ?),
           ?)
   ON CONFLICT(id) DO UPDATE SET content = excluded.content"#;

/// SQLite-backed implementation of `MessageRepository`.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    chat_id: String,
    role: String,
    content: String,
    order: i64,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            chat_id: row.try_get("chat_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            order: row.try_get("order")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let chat_id = Uuid::parse_str(&self.chat_id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat_id: {e}")))?;
        let content: Vec<ContentPart> = serde_json::from_str(&self.content)
            .map_err(|e| RepositoryError::Query(format!("invalid content json: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Message {
            id,
            chat_id,
            role: self.role,
            content,
            order: self.order,
            created_at,
        })
    }
}

fn content_json(content: &[ContentPart]) -> Result<String, RepositoryError> {
    serde_json::to_string(content)
        .map_err(|e| RepositoryError::Query(format!("content serialization: {e}")))
}

impl MessageRepository for SqliteMessageRepository {
    async fn get_message(&self, id: &Uuid) -> Result<Option<Message>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let message_row = MessageRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(message_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn upsert_message(&self, msg: &NewMessage) -> Result<(), RepositoryError> {
        sqlx::query(UPSERT_SQL)
            .bind(msg.id.to_string())
            .bind(msg.chat_id.to_string())
            .bind(&msg.role)
            .bind(content_json(&msg.content)?)
            .bind(msg.chat_id.to_string())
            .bind(format_datetime(&Utc::now()))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn upsert_messages_atomic(&self, msgs: &[NewMessage]) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        for msg in msgs {
            sqlx::query(UPSERT_SQL)
                .bind(msg.id.to_string())
                .bind(msg.chat_id.to_string())
                .bind(&msg.role)
                .bind(content_json(&msg.content)?)
                .bind(msg.chat_id.to_string())
                .bind(format_datetime(&Utc::now()))
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn get_messages_by_chat(&self, chat_id: &Uuid) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(r#"SELECT * FROM messages WHERE chat_id = ? ORDER BY "order" ASC"#)
            .bind(chat_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }
}
