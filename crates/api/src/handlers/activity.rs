//! Handlers for the `/activity` resource.
//!
//! Listing joins each entry against the *current* state of its subject via
//! batched id lookups, one per object type. Entries whose subject has been
//! deleted still appear, with defaulted detail fields.

use axum::extract::{Query, State};
use axum::Json;
use crewdesk_core::activity::{
    correlate, ActivityDetail, AttachmentRef, ChatRef, EntityLookups, ObjectType, ProjectRef,
    TaskRef,
};
use crewdesk_core::types::{DbId, Timestamp};
use crewdesk_db::models::activity::ActivityEntry;
use crewdesk_db::repositories::{
    ActivityLogRepo, AttachmentRepo, ChatRepo, ProjectRepo, TaskRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for activity listing.
#[derive(Debug, Deserialize)]
pub struct ActivityListParams {
    pub limit: Option<i64>,
}

/// One enriched activity entry.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub id: DbId,
    pub user_id: DbId,
    pub action_type: String,
    pub object_type: String,
    pub object_id: DbId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub detail: Option<ActivityDetail>,
}

/// Result body for clearing the activity log.
#[derive(Debug, Serialize)]
pub struct ClearedActivity {
    pub success: bool,
    pub deleted_count: u64,
}

/// GET /api/activity?limit=N
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ActivityListParams>,
) -> AppResult<Json<Vec<ActivityView>>> {
    let limit = params.limit.unwrap_or(100).clamp(1, 500);
    let entries = ActivityLogRepo::list_recent(&state.pool, limit).await?;
    let lookups = load_lookups(&state, &entries).await?;

    let views = entries
        .into_iter()
        .map(|entry| {
            let detail = ObjectType::parse(&entry.object_type)
                .and_then(|object_type| correlate(object_type, entry.object_id, &lookups));
            ActivityView {
                id: entry.id,
                user_id: entry.user_id,
                action_type: entry.action_type,
                object_type: entry.object_type,
                object_id: entry.object_id,
                timestamp: entry.timestamp,
                detail,
            }
        })
        .collect();

    Ok(Json(views))
}

/// DELETE /api/activity
pub async fn clear(State(state): State<AppState>) -> AppResult<Json<ClearedActivity>> {
    let deleted_count = ActivityLogRepo::clear(&state.pool).await?;
    tracing::info!(deleted_count, "Cleared activity log");
    Ok(Json(ClearedActivity {
        success: true,
        deleted_count,
    }))
}

/// Build the per-type lookup tables for a batch of entries.
async fn load_lookups(
    state: &AppState,
    entries: &[ActivityEntry],
) -> Result<EntityLookups, AppError> {
    let mut project_ids = Vec::new();
    let mut task_ids = Vec::new();
    let mut attachment_ids = Vec::new();
    let mut chat_ids = Vec::new();

    for entry in entries {
        match ObjectType::parse(&entry.object_type) {
            Some(ObjectType::Project) => project_ids.push(entry.object_id),
            Some(ObjectType::Task) => task_ids.push(entry.object_id),
            Some(ObjectType::Attachment) => attachment_ids.push(entry.object_id),
            Some(ObjectType::Chat) => chat_ids.push(entry.object_id),
            _ => {}
        }
    }

    let mut lookups = EntityLookups::default();

    if !project_ids.is_empty() {
        for row in ProjectRepo::lookup_refs(&state.pool, &project_ids).await? {
            lookups.projects.insert(
                row.id,
                ProjectRef {
                    name: row.name,
                    description: row.description,
                    status: row.status,
                },
            );
        }
    }
    if !task_ids.is_empty() {
        for row in TaskRepo::lookup_refs(&state.pool, &task_ids).await? {
            lookups.tasks.insert(
                row.id,
                TaskRef {
                    description: row.description,
                    status: row.status,
                    priority: row.priority,
                    assigned_to: row.assigned_to,
                    due_date: row.due_date,
                    project_id: row.project_id,
                    project_name: row.project_name,
                },
            );
        }
    }
    if !attachment_ids.is_empty() {
        for row in AttachmentRepo::lookup_refs(&state.pool, &attachment_ids).await? {
            lookups.attachments.insert(
                row.id,
                AttachmentRef {
                    filename: row.filename,
                    uploaded_by: row.uploaded_by,
                },
            );
        }
    }
    if !chat_ids.is_empty() {
        for row in ChatRepo::lookup_refs(&state.pool, &chat_ids).await? {
            lookups.chats.insert(
                row.id,
                ChatRef {
                    user_name: row.name,
                    message: row.message,
                },
            );
        }
    }

    Ok(lookups)
}
