//! Handlers for attachment upload, listing, download, and deletion.
//!
//! Attachments are a binary sidecar keyed by task id: bytes go into a BYTEA
//! column on upload and come back out on download. Metadata endpoints never
//! touch the blob.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use crewdesk_core::activity::ObjectType;
use crewdesk_core::error::CoreError;
use crewdesk_core::types::DbId;
use crewdesk_db::models::attachment::{AttachmentMeta, AttachmentOverview, CreateAttachment};
use crewdesk_db::repositories::{AttachmentRepo, TaskRepo};

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::Deleted;
use crate::state::AppState;

/// POST /api/tasks/{id}/attachments
///
/// Expects multipart/form-data with a `file` part and an optional
/// `uploaded_by` text part.
pub async fn upload(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<AttachmentMeta>)> {
    if TaskRepo::find_by_id(&state.pool, task_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }));
    }

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut uploaded_by: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .filter(|f| !f.is_empty())
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;
                file = Some((filename, content_type, bytes.to_vec()));
            }
            Some("uploaded_by") => {
                uploaded_by = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))
                    .map(Some)?;
            }
            _ => {}
        }
    }

    let (filename, content_type, content) = file.ok_or_else(|| {
        AppError::Core(CoreError::Validation("No file provided".into()))
    })?;

    let attachment = AttachmentRepo::create(
        &state.pool,
        &CreateAttachment {
            task_id,
            filename,
            content_type,
            content,
            uploaded_by,
        },
    )
    .await?;
    activity::record(&state, "created", ObjectType::Attachment, attachment.id).await;
    Ok((StatusCode::CREATED, Json(attachment)))
}

/// GET /api/tasks/{id}/attachments
pub async fn list_by_task(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<AttachmentMeta>>> {
    let attachments = AttachmentRepo::list_by_task(&state.pool, task_id).await?;
    Ok(Json(attachments))
}

/// GET /api/attachments
///
/// Global listing with owning-task and project context.
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<AttachmentOverview>>> {
    let attachments = AttachmentRepo::list_all(&state.pool).await?;
    Ok(Json(attachments))
}

/// GET /api/attachments/{id}
///
/// Streams the stored bytes back with the original filename and media type.
pub async fn download(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let attachment = AttachmentRepo::find_content(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    let content_type = attachment
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    // Header values must stay on one line and unquoted.
    let filename = attachment.filename.replace(['"', '\r', '\n'], "_");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(attachment.content))
        .map_err(|e| AppError::InternalError(format!("Failed to build response: {e}")))
}

/// DELETE /api/attachments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Deleted>> {
    let deleted = AttachmentRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;
    activity::record(&state, "deleted", ObjectType::Attachment, id).await;
    Ok(Json(Deleted {
        deleted: true,
        id: deleted,
    }))
}
