//! Message repository trait definition.
//!
//! Defines the storage interface for chat messages. The infrastructure
//! layer (chatsink-infra) implements this trait with SQLite persistence.
//!
//! Uses native async fn in traits (Rust 2024 edition, no async_trait macro).

use chatsink_types::error::RepositoryError;
use chatsink_types::message::{Message, NewMessage};
use uuid::Uuid;

/// Storage interface for message records.
///
/// The upsert is the write primitive of the ingestion pipeline: keyed by
/// message id, it must be atomic (no separate read-then-write) so that a
/// retry racing the original request cannot duplicate a message. The
/// insert path assigns `order` and `created_at`; the update path touches
/// only `content`.
pub trait MessageRepository: Send + Sync {
    /// Point lookup by message id.
    fn get_message(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Insert-or-update one message, keyed by `msg.id`.
    fn upsert_message(
        &self,
        msg: &NewMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Upsert a whole batch inside one transaction: either every message
    /// is written or none is.
    fn upsert_messages_atomic(
        &self,
        msgs: &[NewMessage],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All messages of a chat, ordered by `order` ascending.
    fn get_messages_by_chat(
        &self,
        chat_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
