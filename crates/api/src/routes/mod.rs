//! Route registration, one module per resource.

pub mod activity;
pub mod alerts;
pub mod attachments;
pub mod calendar;
pub mod chat;
pub mod graph;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
        .nest("/attachments", attachments::router())
        .nest("/chat", chat::router())
        .nest("/activity", activity::router())
        .nest("/graph", graph::router())
        .nest("/calendar", calendar::router())
        .nest("/alerts", alerts::router())
}
