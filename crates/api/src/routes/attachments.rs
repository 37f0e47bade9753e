//! Route definitions for task-independent attachment access.
//!
//! ```text
//! GET    /       list all (with task/project context)
//! GET    /{id}   download stored bytes
//! DELETE /{id}   delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::attachment;
use crate::state::AppState;

/// Routes mounted at `/attachments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attachment::list_all))
        .route(
            "/{id}",
            get(attachment::download).delete(attachment::delete),
        )
}
