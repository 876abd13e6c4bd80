//! End-to-end tests for the ingestion API over an in-process router
//! backed by a temporary SQLite database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn test_router() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let state = chatsink_api::state::AppState::init(dir.path()).await.unwrap();
    let router = chatsink_api::http::router::build_router(state);
    (dir, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn batch(chat_id: &Uuid, items: &[(Uuid, &str)]) -> Value {
    json!({
        "chatId": chat_id.to_string(),
        "messages": items
            .iter()
            .map(|(id, html)| json!({
                "messageId": id.to_string(),
                "message": "display",
                "messageHtml": html,
                "type": "user",
            }))
            .collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn test_ingest_round_trip() {
    let (_dir, router) = test_router().await;
    let chat_id = Uuid::new_v4();
    let message_id = Uuid::new_v4();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(batch(
            &chat_id,
            &[(message_id, "<p>Hello <b>world</b><script>alert(1)</script></p>")],
        )),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Chat sent successfully");
    assert!(body["chatUrl"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/chat/{chat_id}")));

    let (status, messages) = send(
        &router,
        Method::GET,
        &format!("/api/v1/chats/{chat_id}/messages"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"][0]["type"], "text");
    assert_eq!(messages[0]["content"][0]["text"], "Hello world");
    assert_eq!(messages[0]["order"], 0);
}

#[tokio::test]
async fn test_resubmission_is_idempotent() {
    let (_dir, router) = test_router().await;
    let chat_id = Uuid::new_v4();
    let message_id = Uuid::new_v4();

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(batch(&chat_id, &[(message_id, "<p>first</p>")])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(batch(&chat_id, &[(message_id, "<p>second</p>")])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, messages) = send(
        &router,
        Method::GET,
        &format!("/api/v1/chats/{chat_id}/messages"),
        None,
    )
    .await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"][0]["text"], "second");

    // Exactly one chat was provisioned across both batches.
    let (_, history) = send(&router, Method::GET, "/api/v1/history", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validation_failure_reports_issues_and_writes_nothing() {
    let (_dir, router) = test_router().await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(json!({ "chatId": "not-a-uuid", "messages": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    let issues = body["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["field"], "chatId");

    let (_, history) = send(&router, Method::GET, "/api/v1/history", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_html_persists_empty_content() {
    let (_dir, router) = test_router().await;
    let chat_id = Uuid::new_v4();
    let message_id = Uuid::new_v4();

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(batch(&chat_id, &[(message_id, "   ")])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, messages) = send(
        &router,
        Method::GET,
        &format!("/api/v1/chats/{chat_id}/messages"),
        None,
    )
    .await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0]["content"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_messages_for_unknown_chat_is_404() {
    let (_dir, router) = test_router().await;
    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/v1/chats/{}/messages", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_visibility_update() {
    let (_dir, router) = test_router().await;
    let chat_id = Uuid::new_v4();
    send(
        &router,
        Method::POST,
        "/api/v1/chat",
        Some(batch(&chat_id, &[(Uuid::new_v4(), "<p>hi</p>")])),
    )
    .await;

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/api/v1/chats/{chat_id}/visibility"),
        Some(json!({ "visibility": "private" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, history) = send(&router, Method::GET, "/api/v1/history", None).await;
    assert_eq!(history[0]["visibility"], "private");

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/api/v1/chats/{}/visibility", Uuid::new_v4()),
        Some(json!({ "visibility": "private" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let (_dir, router) = test_router().await;
    let (status, _) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
