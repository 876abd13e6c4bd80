//! Chat repository trait definition.
//!
//! Uses native async fn in traits (Rust 2024 edition, no async_trait macro).

use chatsink_types::chat::{Chat, Visibility};
use chatsink_types::error::RepositoryError;
use uuid::Uuid;

/// Storage interface for chat records.
///
/// All operations must be safe to invoke concurrently for distinct ids.
pub trait ChatRepository: Send + Sync {
    /// Point lookup by chat id.
    fn get_chat(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Chat>, RepositoryError>> + Send;

    /// Atomic get-or-create: insert the chat if no record with its id
    /// exists, then return the stored record (the existing one on
    /// conflict, unchanged). Never updates an existing chat.
    fn create_if_absent(
        &self,
        chat: &Chat,
    ) -> impl std::future::Future<Output = Result<Chat, RepositoryError>> + Send;

    /// All chats owned by a principal, newest first.
    fn list_chats_by_owner(
        &self,
        owner_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Chat>, RepositoryError>> + Send;

    /// Set a chat's visibility. Returns `false` if the chat does not exist.
    fn set_visibility(
        &self,
        id: &Uuid,
        visibility: Visibility,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
