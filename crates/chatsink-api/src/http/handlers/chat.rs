//! Chat read and visibility endpoints.
//!
//! GET /api/v1/history - chats for the configured principal, newest first.
//! GET /api/v1/chats/{id}/messages - messages of a chat in display order.
//! PUT /api/v1/chats/{id}/visibility - set a chat's visibility flag.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chatsink_core::repository::{ChatRepository, MessageRepository};
use chatsink_types::chat::{Chat, Visibility};
use chatsink_types::error::{IngestError, RepositoryError};
use chatsink_types::message::Message;

use crate::http::error::AppError;
use crate::state::AppState;

fn storage(e: RepositoryError) -> AppError {
    AppError::Ingest(IngestError::Storage(e))
}

/// GET /api/v1/history - List chats owned by the placeholder principal.
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<Chat>>, AppError> {
    let chats = state
        .chat_repo
        .list_chats_by_owner(&state.config.default_owner_id)
        .await
        .map_err(storage)?;

    Ok(Json(chats))
}

/// GET /api/v1/chats/{id}/messages - Messages of a chat, ordered by `order`.
pub async fn get_chat_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    let chat = state.chat_repo.get_chat(&id).await.map_err(storage)?;
    if chat.is_none() {
        return Err(AppError::NotFound("chat"));
    }

    let messages = state
        .message_repo
        .get_messages_by_chat(&id)
        .await
        .map_err(storage)?;

    Ok(Json(messages))
}

/// Request body for the visibility update.
#[derive(Debug, Deserialize)]
pub struct SetVisibilityRequest {
    pub visibility: Visibility,
}

/// Acknowledgement for the visibility update.
#[derive(Debug, Serialize)]
pub struct SetVisibilityResponse {
    pub success: bool,
}

/// PUT /api/v1/chats/{id}/visibility - Set a chat's visibility.
pub async fn set_chat_visibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetVisibilityRequest>,
) -> Result<Json<SetVisibilityResponse>, AppError> {
    let updated = state
        .chat_repo
        .set_visibility(&id, body.visibility)
        .await
        .map_err(storage)?;

    if !updated {
        return Err(AppError::NotFound("chat"));
    }

    Ok(Json(SetVisibilityResponse { success: true }))
}
