//! Route definitions for chat messages.
//!
//! ```text
//! GET    /       list (newest first)
//! POST   /       send
//! DELETE /{id}   delete
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::list).post(chat::send))
        .route("/{id}", delete(chat::delete))
}
