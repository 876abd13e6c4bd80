//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Batch ingestion
        .route("/chat", post(handlers::ingest::ingest_chat))
        // Chat history for the configured principal
        .route("/history", get(handlers::chat::get_history))
        // Per-chat reads and visibility
        .route(
            "/chats/{id}/messages",
            get(handlers::chat::get_chat_messages),
        )
        .route(
            "/chats/{id}/visibility",
            put(handlers::chat::set_chat_visibility),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness probe.
async fn health_check() -> &'static str {
    "ok"
}
