//! Route definitions for calendar views of due-dated tasks.
//!
//! ```text
//! GET /tasks        due-dated tasks (?from=..&to=.. inclusive range)
//! GET /tasks/{id}   single-task calendar view
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(calendar::list_tasks))
        .route("/tasks/{id}", get(calendar::get_task))
}
