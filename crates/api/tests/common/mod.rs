//! Shared helpers for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of the per-test database pool provided by `#[sqlx::test]`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use crewdesk_api::config::ServerConfig;
use crewdesk_api::notify::SlackNotifier;
use crewdesk_api::router::build_app_router;
use crewdesk_api::state::AppState;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build the full application router against a test database pool.
pub fn test_app(pool: PgPool) -> Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        slack_webhook_url: None,
        actor_id: 1,
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier: SlackNotifier::new(None),
    };
    build_app_router(state, &config)
}

/// Send one request, returning the status and parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::DELETE, uri, None).await
}

/// Create a project and return its id.
pub async fn create_project(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/api/projects", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "project create failed: {body}");
    body["id"].as_i64().unwrap()
}

/// Create a task and return its id.
pub async fn create_task(app: &Router, project_id: i64, title: &str, extra: Value) -> i64 {
    let mut body = json!({ "project_id": project_id, "title": title });
    if let (Some(obj), Some(extra_obj)) = (body.as_object_mut(), extra.as_object()) {
        for (k, v) in extra_obj {
            obj.insert(k.clone(), v.clone());
        }
    }
    let (status, body) = post(app, "/api/tasks", body).await;
    assert_eq!(status, StatusCode::CREATED, "task create failed: {body}");
    body["id"].as_i64().unwrap()
}
