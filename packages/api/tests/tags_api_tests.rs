// ABOUTME: HTTP tests for the tag API router
// ABOUTME: Drives the router with oneshot requests over in-memory persistence

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use savevault_api::{create_router, TagCommands};
use savevault_tags::{MemoryPersistence, TagStore};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app_with(persistence: Arc<MemoryPersistence>) -> Router {
    let store = TagStore::open(persistence).await.unwrap();
    create_router(TagCommands::new(Arc::new(store)))
}

async fn app() -> Router {
    app_with(Arc::new(MemoryPersistence::new())).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_tags() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "Important", "color": "#EF4444"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({"name": "Important", "color": "#EF4444"}));

    let (status, body) = send(&app, Method::GET, "/api/tags", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{"name": "Important", "color": "#EF4444"}]));
}

#[tokio::test]
async fn test_error_status_codes() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "test", "color": "#FF0000"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "test", "color": "#00FF00"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Tag already exists: test");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "x", "color": "red"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "  ", "color": "#FFF"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/api/tags/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_tagging_scenario() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "Important", "color": "#EF4444"})),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/saves/tags/Survival/world1",
        Some(json!({"tagNames": ["Important"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/saves/tags/Survival/world1", None).await;
    assert_eq!(body["data"], json!([{"name": "Important", "color": "#EF4444"}]));

    let (_, body) = send(&app, Method::GET, "/api/tags/Important/targets", None).await;
    assert_eq!(
        body["data"],
        json!([{"type": "Save", "relativePath": "Survival/world1"}])
    );

    let (status, _) = send(&app, Method::DELETE, "/api/tags/Important", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/saves/tags/Survival/world1", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_backup_tagging_and_unknown_tag() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "a", "color": "#111"})),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/backups/Survival/b1.zip/tags",
        Some(json!({"tagNames": ["a", "missing"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/backups/Survival/b1.zip/tags", None).await;
    assert_eq!(body["data"], json!([]));

    send(
        &app,
        Method::POST,
        "/api/backups/Survival/b1.zip/tags",
        Some(json!({"tagNames": ["a"]})),
    )
    .await;
    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/backups/Survival/b1.zip/tags",
        Some(json!({"tagNames": ["a"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/backups/Survival/b1.zip/tags", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_update_tag_renames_and_recolors() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "old", "color": "#111"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/saves/tags/world1",
        Some(json!({"tagNames": ["old"]})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/tags/old",
        Some(json!({"name": "new", "color": "#222222"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"name": "new", "color": "#222222"}));

    let (_, body) = send(&app, Method::GET, "/api/saves/tags/world1", None).await;
    assert_eq!(body["data"], json!([{"name": "new", "color": "#222222"}]));

    let (status, _) = send(&app, Method::GET, "/api/tags/old", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_persistence_failure_is_internal_error() {
    let persistence = Arc::new(MemoryPersistence::new());
    let app = app_with(persistence.clone()).await;
    persistence.set_fail_saves(true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tags",
        Some(json!({"name": "a", "color": "#111"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, Method::GET, "/api/tags", None).await;
    assert_eq!(body["data"], json!([]));
}
