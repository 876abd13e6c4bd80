//! Batch ingestion endpoint.
//!
//! POST /api/v1/chat
//!
//! Accepts a chat id and a batch of rich-text content items, runs the
//! validate -> normalize -> provision -> upsert pipeline, and acknowledges
//! with a reference locator for the chat.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use chatsink_types::ingest::IngestRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// Success acknowledgement for a fully ingested batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub success: bool,
    pub message: String,
    pub chat_url: String,
}

/// POST /api/v1/chat - Ingest a batch of chat messages.
pub async fn ingest_chat(
    State(state): State<AppState>,
    Json(body): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    let receipt = state.ingest_service.ingest(&body).await?;

    Ok(Json(IngestResponse {
        success: true,
        message: "Chat sent successfully".to_string(),
        chat_url: receipt.chat_url,
    }))
}
