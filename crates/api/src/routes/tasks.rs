//! Route definitions for tasks and their sub-resources.
//!
//! ```text
//! GET    /                   list (optional ?project_id=N filter)
//! POST   /                   create
//! GET    /{id}               get_by_id (subtasks + attachments embedded)
//! PUT    /{id}               update
//! DELETE /{id}               delete (cascades to subtask subtree)
//! POST   /{id}/subtasks      create_subtask (inherits parent's project)
//! GET    /{id}/attachments   list attachments for the task
//! POST   /{id}/attachments   upload attachment (multipart)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attachment, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(task::list).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/subtasks", post(task::create_subtask))
        .route(
            "/{id}/attachments",
            get(attachment::list_by_task).post(attachment::upload),
        )
}
