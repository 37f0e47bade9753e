//! Repository for the `attachments` table.

use crewdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::AttachmentRefRow;
use crate::models::attachment::{
    AttachmentContent, AttachmentMeta, AttachmentOverview, CreateAttachment,
};

/// Metadata column list; the blob is only fetched for downloads.
const META_COLUMNS: &str = "id, task_id, filename, content_type, uploaded_by, uploaded_at";

/// Provides storage operations for attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Insert a new attachment, returning its metadata.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttachment,
    ) -> Result<AttachmentMeta, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (task_id, filename, content_type, content, uploaded_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, AttachmentMeta>(&query)
            .bind(input.task_id)
            .bind(&input.filename)
            .bind(&input.content_type)
            .bind(&input.content)
            .bind(&input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// List attachment metadata for one task, oldest first.
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<AttachmentMeta>, sqlx::Error> {
        let query = format!(
            "SELECT {META_COLUMNS} FROM attachments WHERE task_id = $1 ORDER BY uploaded_at"
        );
        sqlx::query_as::<_, AttachmentMeta>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    /// List all attachments with task and project context, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AttachmentOverview>, sqlx::Error> {
        sqlx::query_as::<_, AttachmentOverview>(
            "SELECT a.id, a.task_id, a.filename, a.content_type, a.uploaded_by, a.uploaded_at,
                    t.title AS task_title, t.project_id, p.name AS project_name
             FROM attachments a
             JOIN tasks t ON a.task_id = t.id
             JOIN projects p ON t.project_id = p.id
             ORDER BY a.uploaded_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Fetch filename, media type, and bytes for a download.
    pub async fn find_content(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttachmentContent>, sqlx::Error> {
        sqlx::query_as::<_, AttachmentContent>(
            "SELECT filename, content_type, content FROM attachments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete an attachment by ID. Returns the deleted id, or `None` if no
    /// row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("DELETE FROM attachments WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch current-state rows for activity enrichment.
    pub async fn lookup_refs(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<AttachmentRefRow>, sqlx::Error> {
        sqlx::query_as::<_, AttachmentRefRow>(
            "SELECT id, filename, uploaded_by FROM attachments WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}
