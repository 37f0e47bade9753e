//! Chat message model.

use crewdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A chat message row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub name: String,
    pub message: String,
    pub time: Timestamp,
}
