//! Handlers for the `/chat` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crewdesk_core::activity::ObjectType;
use crewdesk_core::error::CoreError;
use crewdesk_core::types::DbId;
use crewdesk_db::models::chat::ChatMessage;
use crewdesk_db::repositories::ChatRepo;
use serde::Deserialize;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::Deleted;
use crate::state::AppState;

/// Request body for sending a chat message.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub name: Option<String>,
    pub message: String,
}

/// POST /api/chat
pub async fn send(
    State(state): State<AppState>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<ChatMessage>)> {
    let message = input.message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message cannot be empty".into(),
        )));
    }
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown");

    let created = ChatRepo::create(&state.pool, name, message).await?;
    activity::record(&state, "created", ObjectType::Chat, created.id).await;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/chat
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ChatMessage>>> {
    let messages = ChatRepo::list(&state.pool).await?;
    Ok(Json(messages))
}

/// DELETE /api/chat/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Deleted>> {
    let deleted = ChatRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Message",
            id,
        }))?;
    activity::record(&state, "deleted", ObjectType::Chat, id).await;
    Ok(Json(Deleted {
        deleted: true,
        id: deleted,
    }))
}
