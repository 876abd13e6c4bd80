//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `chatsink-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reads on the
//! reader pool and writes on the single writer connection.
//!
//! The get-or-create used by the provisioner is a conditional insert
//! (`ON CONFLICT(id) DO NOTHING`), not a read-then-write pair, so a retry
//! racing the original request cannot create a duplicate chat.

use chatsink_core::repository::ChatRepository;
use chatsink_types::chat::{Chat, Visibility};
use chatsink_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Chat.
struct ChatRow {
    id: String,
    user_id: String,
    title: String,
    visibility: String,
    created_at: String,
}

impl ChatRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            visibility: row.try_get("visibility")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_chat(self) -> Result<Chat, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid chat id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let visibility: Visibility = self
            .visibility
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Chat {
            id,
            user_id,
            title: self.title,
            visibility,
            created_at,
        })
    }
}

impl ChatRepository for SqliteChatRepository {
    async fn get_chat(&self, id: &Uuid) -> Result<Option<Chat>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chats WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let chat_row =
                    ChatRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(chat_row.into_chat()?))
            }
            None => Ok(None),
        }
    }

    async fn create_if_absent(&self, chat: &Chat) -> Result<Chat, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chats (id, user_id, title, visibility, created_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(id) DO NOTHING"#,
        )
        .bind(chat.id.to_string())
        .bind(chat.user_id.to_string())
        .bind(&chat.title)
        .bind(chat.visibility.to_string())
        .bind(format_datetime(&chat.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Return the stored record: the existing chat on conflict,
        // otherwise the one just inserted.
        self.get_chat(&chat.id)
            .await?
            .ok_or_else(|| RepositoryError::Query("chat missing after conditional insert".to_string()))
    }

    async fn list_chats_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Chat>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM chats WHERE user_id = ? ORDER BY created_at DESC")
            .bind(owner_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                ChatRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_chat()
            })
            .collect()
    }

    async fn set_visibility(
        &self,
        id: &Uuid,
        visibility: Visibility,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE chats SET visibility = ? WHERE id = ?")
            .bind(visibility.to_string())
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
