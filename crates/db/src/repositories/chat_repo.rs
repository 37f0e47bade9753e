//! Repository for the `chat_messages` table.

use crewdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::ChatRefRow;
use crate::models::chat::ChatMessage;

/// Provides storage operations for chat messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Insert a new message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        message: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (name, message)
             VALUES ($1, $2)
             RETURNING id, name, message, time",
        )
        .bind(name)
        .bind(message)
        .fetch_one(pool)
        .await
    }

    /// List all messages, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ChatMessage>, sqlx::Error> {
        sqlx::query_as::<_, ChatMessage>(
            "SELECT id, name, message, time FROM chat_messages ORDER BY time DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a message by ID. Returns the deleted id, or `None` if no row
    /// matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("DELETE FROM chat_messages WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch current-state rows for activity enrichment.
    pub async fn lookup_refs(pool: &PgPool, ids: &[DbId]) -> Result<Vec<ChatRefRow>, sqlx::Error> {
        sqlx::query_as::<_, ChatRefRow>(
            "SELECT id, name, message FROM chat_messages WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
