//! Repository for the `activity_log` table.
//!
//! The table is append-only: entries are inserted, listed, and bulk-cleared,
//! never updated.

use crewdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::ActivityEntry;

const COLUMNS: &str = "id, user_id, action_type, object_type, object_id, timestamp";

/// Provides append and read operations for the activity log.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one entry.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        action_type: &str,
        object_type: &str,
        object_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO activity_log (user_id, action_type, object_type, object_id)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(action_type)
        .bind(object_type)
        .bind(object_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch the most recent entries, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM activity_log ORDER BY timestamp DESC LIMIT $1");
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete every entry, returning how many were removed.
    pub async fn clear(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activity_log").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
