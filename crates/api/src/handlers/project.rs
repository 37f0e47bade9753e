//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crewdesk_core::activity::ObjectType;
use crewdesk_core::error::CoreError;
use crewdesk_core::types::DbId;
use crewdesk_db::models::project::{CreateProject, Project, ProjectDetail, UpdateProject};
use crewdesk_db::repositories::{ProjectRepo, TaskRepo};

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::Deleted;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name is required".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    activity::record(&state, "created", ObjectType::Project, project.id).await;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
///
/// Embeds the project's tasks in creation order.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(ProjectDetail { project, tasks }))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No updatable fields provided".into(),
        )));
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    activity::record(&state, "updated", ObjectType::Project, id).await;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Cascades to the project's tasks, their subtask subtrees, and all
/// attachments on any of them, in one atomic statement.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Deleted>> {
    let deleted = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    activity::record(&state, "deleted", ObjectType::Project, id).await;
    Ok(Json(Deleted {
        deleted: true,
        id: deleted,
    }))
}
