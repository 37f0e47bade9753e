//! Route definitions for the derived graph view.
//!
//! ```text
//! GET /              full node/edge view
//! GET /refresh       minimal node sets + server timestamp
//! GET /stats         aggregate counts
//! GET /node/{key}    single-node detail (`project-<id>` / `task-<id>`)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::graph;
use crate::state::AppState;

/// Routes mounted at `/graph`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(graph::full))
        .route("/refresh", get(graph::refresh))
        .route("/stats", get(graph::stats))
        .route("/node/{key}", get(graph::node_detail))
}
