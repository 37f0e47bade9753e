//! Route definitions for projects.
//!
//! ```text
//! GET    /            list
//! POST   /            create
//! GET    /{id}        get_by_id (tasks embedded)
//! PUT    /{id}        update
//! DELETE /{id}        delete (cascades to tasks and attachments)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
}
