//! End-to-end tests for entity CRUD, validation, the activity trail, and
//! the attachment sidecar.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{create_project, create_task, delete, get, post, put, test_app};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Update whitelist semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_update_is_rejected_and_writes_nothing(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Frozen").await;
    let (_, before) = get(&app, &format!("/api/projects/{p}")).await;

    let (status, body) = put(&app, &format!("/api/projects/{p}"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    // Non-whitelisted fields are ignored, so this is still an empty set.
    let (status, _) = put(
        &app,
        &format!("/api/projects/{p}"),
        json!({ "id": 42, "created_at": "2020-01-01T00:00:00Z" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = get(&app, &format!("/api/projects/{p}")).await;
    assert_eq!(before["updated_at"], after["updated_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_task_project_is_immutable(pool: PgPool) {
    let app = test_app(pool);

    let p1 = create_project(&app, "Home").await;
    let p2 = create_project(&app, "Away").await;
    let t = create_task(&app, p1, "stay put", json!({})).await;

    // project_id is not whitelisted; it rides along ignored.
    let (status, body) = put(
        &app,
        &format!("/api/tasks/{t}"),
        json!({ "project_id": p2, "title": "renamed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "renamed");
    assert_eq!(body["project_id"], json!(p1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_entities_return_404(pool: PgPool) {
    let app = test_app(pool);

    let (status, _) = put(&app, "/api/projects/999999", json!({ "name": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete(&app, "/api/tasks/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Hierarchy and dependency cycle rejection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_parent_cycles_are_rejected(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Cyclic").await;
    let t1 = create_task(&app, p, "t1", json!({})).await;
    let t2 = create_task(&app, p, "t2", json!({ "parent_task_id": t1 })).await;
    let t3 = create_task(&app, p, "t3", json!({ "parent_task_id": t2 })).await;

    // Self-reference.
    let (status, _) = put(&app, &format!("/api/tasks/{t1}"), json!({ "parent_task_id": t1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Closing the chain t3 -> t2 -> t1 back onto t1.
    let (status, _) = put(&app, &format!("/api/tasks/{t1}"), json!({ "parent_task_id": t3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Legitimate reparenting still works.
    let (status, _) = put(&app, &format!("/api/tasks/{t3}"), json!({ "parent_task_id": t1 })).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dependency_cycles_are_rejected(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Blocked").await;
    let t1 = create_task(&app, p, "t1", json!({})).await;
    let t2 = create_task(&app, p, "t2", json!({ "depends_on_task_id": t1 })).await;

    let (status, _) = put(
        &app,
        &format!("/api/tasks/{t1}"),
        json!({ "depends_on_task_id": t2 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put(
        &app,
        &format!("/api/tasks/{t1}"),
        json!({ "depends_on_task_id": t1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Subtask shortcut and referential conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_subtask_shortcut_inherits_parent_project(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Parenting").await;
    let parent = create_task(&app, p, "parent", json!({})).await;

    let (status, body) = post(
        &app,
        &format!("/api/tasks/{parent}/subtasks"),
        json!({ "title": "child" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["project_id"], json!(p));
    assert_eq!(body["parent_task_id"], json!(parent));

    let (status, _) = post(&app, "/api/tasks/999999/subtasks", json!({ "title": "orphan" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_task_against_missing_project_conflicts(pool: PgPool) {
    let app = test_app(pool);

    let (status, _) = post(
        &app,
        "/api/tasks",
        json!({ "project_id": 999999, "title": "ghost" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_required_fields_are_rejected(pool: PgPool) {
    let app = test_app(pool);

    let (status, _) = post(&app, "/api/projects", json!({ "name": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let p = create_project(&app, "Named").await;
    let (status, _) = post(&app, "/api/tasks", json!({ "project_id": p, "title": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Activity trail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_activity_enrichment_survives_subject_deletion(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Audited").await;
    let t = create_task(&app, p, "tracked", json!({ "assigned_to": "dana" })).await;

    let (status, entries) = get(&app, "/api/activity").await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap();

    // Live task entry is enriched from current state.
    let task_entry = entries
        .iter()
        .find(|e| e["object_type"] == "task" && e["action_type"] == "created")
        .expect("task creation entry");
    assert_eq!(task_entry["object_id"], json!(t));
    assert_eq!(task_entry["assigned_to"], "dana");
    assert_eq!(task_entry["project_name"], "Audited");

    // Delete the task: its entries remain, enriched with defaults.
    delete(&app, &format!("/api/tasks/{t}")).await;

    let (_, entries) = get(&app, "/api/activity").await;
    let deleted_entry = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["object_type"] == "task" && e["action_type"] == "deleted")
        .expect("task deletion entry");
    assert_eq!(deleted_entry["object_id"], json!(t));
    assert_eq!(deleted_entry["status"], "todo");
    assert_eq!(deleted_entry["priority"], json!(3));
    assert_eq!(deleted_entry["project_name"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_failed_mutations_leave_no_activity_entry(pool: PgPool) {
    let app = test_app(pool);

    let (status, _) = delete(&app, "/api/projects/999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, entries) = get(&app, "/api/activity").await;
    assert!(entries.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_activity_clear_reports_deleted_count(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Cleared").await;
    create_task(&app, p, "one", json!({})).await;

    let (status, body) = delete(&app, "/api/activity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_count"], json!(2));

    let (_, entries) = get(&app, "/api/activity").await;
    assert!(entries.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_chat_defaults_blank_sender_and_rejects_empty_message(pool: PgPool) {
    let app = test_app(pool);

    let (status, body) = post(&app, "/api/chat", json!({ "message": "hello team" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Unknown");

    let (status, _) = post(&app, "/api/chat", json!({ "name": "dana", "message": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, messages) = get(&app, "/api/chat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Attachments (multipart upload, download, cascade)
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "test-boundary";

fn multipart_body(filename: &str, content: &str, uploaded_by: &str) -> String {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"uploaded_by\"\r\n\r\n\
         {uploaded_by}\r\n\
         --{BOUNDARY}--\r\n"
    )
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_attachment_upload_download_and_cascade(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "Files").await;
    let t = create_task(&app, p, "with attachment", json!({})).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/tasks/{t}/attachments"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body("notes.txt", "hello", "dana")))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let meta: Value = serde_json::from_slice(&bytes).unwrap();
    let attachment_id = meta["id"].as_i64().unwrap();
    assert_eq!(meta["filename"], "notes.txt");
    assert_eq!(meta["uploaded_by"], "dana");

    // Download returns the stored bytes with the original filename.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/attachments/{attachment_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"notes.txt\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"hello");

    // Deleting the project cascades to the attachment.
    delete(&app, &format!("/api/projects/{p}")).await;
    let (status, _) = get(&app, &format!("/api/attachments/{attachment_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_attachment_upload_without_file_is_rejected(pool: PgPool) {
    let app = test_app(pool);

    let p = create_project(&app, "NoFile").await;
    let t = create_task(&app, p, "bare", json!({})).await;

    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"uploaded_by\"\r\n\r\n\
         dana\r\n\
         --{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/tasks/{t}/attachments"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
