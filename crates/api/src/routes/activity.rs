//! Route definitions for the activity log.
//!
//! ```text
//! GET    /   recent enriched entries (?limit=N, bounded)
//! DELETE /   clear all entries, returning the deleted count
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Routes mounted at `/activity`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity::list).delete(activity::clear))
}
