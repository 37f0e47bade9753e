//! Attachment models.
//!
//! File bytes live in a BYTEA column. Metadata queries never select the
//! blob; only downloads fetch [`AttachmentContent`].

use crewdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Attachment metadata, as returned by uploads and listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttachmentMeta {
    pub id: DbId,
    pub task_id: DbId,
    pub filename: String,
    pub content_type: Option<String>,
    pub uploaded_by: Option<String>,
    pub uploaded_at: Timestamp,
}

/// Filename, media type, and raw bytes for a download.
#[derive(Debug, FromRow)]
pub struct AttachmentContent {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

/// Global listing row with owning-task and project context.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttachmentOverview {
    pub id: DbId,
    pub task_id: DbId,
    pub filename: String,
    pub content_type: Option<String>,
    pub uploaded_by: Option<String>,
    pub uploaded_at: Timestamp,
    pub task_title: String,
    pub project_id: DbId,
    pub project_name: String,
}

/// Fields for inserting a new attachment, assembled from a multipart upload.
#[derive(Debug)]
pub struct CreateAttachment {
    pub task_id: DbId,
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
    pub uploaded_by: Option<String>,
}
