//! Activity log entry model and the per-type lookup rows used to enrich
//! entries at read time.

use chrono::NaiveDate;
use crewdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single activity log row. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub action_type: String,
    pub object_type: String,
    pub object_id: DbId,
    pub timestamp: Timestamp,
}

/// Current project state for activity enrichment.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRefRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// Current task state (with owning project name) for activity enrichment.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRefRow {
    pub id: DbId,
    pub description: Option<String>,
    pub status: String,
    pub priority: i32,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub project_name: String,
}

/// Current attachment state for activity enrichment.
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentRefRow {
    pub id: DbId,
    pub filename: String,
    pub uploaded_by: Option<String>,
}

/// Current chat-message state for activity enrichment.
#[derive(Debug, Clone, FromRow)]
pub struct ChatRefRow {
    pub id: DbId,
    pub name: String,
    pub message: String,
}
