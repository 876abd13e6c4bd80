//! Ingestion service: chat provisioning plus the batch upsert orchestrator.
//!
//! Generic over `ChatRepository` and `MessageRepository` to maintain
//! clean architecture (chatsink-core never depends on chatsink-infra).
//!
//! Per batch: validate, normalize every item (no storage touched yet, so
//! shape/content errors abort with zero side effects), provision the chat
//! once, then fan out the per-item upserts and join at a barrier. The
//! fan-out has no ordering guarantee between items; the only causal
//! contract is that chat creation is durably visible before any message
//! write begins.

use chatsink_types::chat::{Chat, Visibility};
use chatsink_types::config::{AppConfig, CommitPolicy};
use chatsink_types::error::IngestError;
use chatsink_types::ingest::{IngestReceipt, IngestRequest, ValidBatch};
use chatsink_types::message::NewMessage;
use chrono::Utc;
use futures_util::future::try_join_all;
use tracing::info;
use uuid::Uuid;

use crate::normalize::normalize_item;
use crate::repository::{ChatRepository, MessageRepository};
use crate::validate::validate_request;

/// Orchestrates validation, normalization, chat provisioning, and the
/// concurrent message upsert fan-out.
pub struct IngestService<C: ChatRepository, M: MessageRepository> {
    chat_repo: C,
    message_repo: M,
    config: AppConfig,
}

impl<C: ChatRepository, M: MessageRepository> IngestService<C, M> {
    /// Create a new ingestion service with the given repositories.
    pub fn new(chat_repo: C, message_repo: M, config: AppConfig) -> Self {
        Self {
            chat_repo,
            message_repo,
            config,
        }
    }

    /// Ingest a raw request: validate, then run the batch.
    pub async fn ingest(&self, request: &IngestRequest) -> Result<IngestReceipt, IngestError> {
        let batch = validate_request(request).map_err(IngestError::Validation)?;
        self.ingest_batch(&batch).await
    }

    /// Run a validated batch through normalization, provisioning, and the
    /// upsert fan-out.
    pub async fn ingest_batch(&self, batch: &ValidBatch) -> Result<IngestReceipt, IngestError> {
        // Normalize every item before the first write so a content error
        // aborts the whole batch with no side effects.
        let mut writes = Vec::with_capacity(batch.items.len());
        for item in &batch.items {
            let content = normalize_item(item)?;
            writes.push(NewMessage {
                id: item.message_id,
                chat_id: batch.chat_id,
                role: item.role.clone(),
                content,
            });
        }

        // Must complete before any message write (foreign key contract).
        self.ensure_chat(batch.chat_id).await?;

        match self.config.commit_policy {
            CommitPolicy::Partial => {
                try_join_all(
                    writes
                        .iter()
                        .map(|msg| self.message_repo.upsert_message(msg)),
                )
                .await?;
            }
            CommitPolicy::Atomic => {
                self.message_repo.upsert_messages_atomic(&writes).await?;
            }
        }

        info!(chat_id = %batch.chat_id, items = writes.len(), "batch ingested");

        Ok(IngestReceipt {
            chat_id: batch.chat_id,
            chat_url: self.config.chat_url(&batch.chat_id),
        })
    }

    /// Ensure a chat record exists for `chat_id`, creating one with the
    /// configured placeholder owner, default title, and public visibility
    /// if absent. An existing chat is returned unchanged.
    pub async fn ensure_chat(&self, chat_id: Uuid) -> Result<Chat, IngestError> {
        let chat = Chat {
            id: chat_id,
            user_id: self.config.default_owner_id,
            title: self.config.default_chat_title.clone(),
            visibility: Visibility::Public,
            created_at: Utc::now(),
        };
        Ok(self.chat_repo.create_if_absent(&chat).await?)
    }
}
