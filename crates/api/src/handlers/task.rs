//! Handlers for the `/tasks` resource.
//!
//! Updates that rewire `parent_task_id` or `depends_on_task_id` are checked
//! against the existing link chains first: the store itself does not reject
//! cycles, and a loop would make the subtask tree and the graph view
//! nonsensical.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crewdesk_core::activity::ObjectType;
use crewdesk_core::error::CoreError;
use crewdesk_core::hierarchy::creates_cycle;
use crewdesk_core::types::DbId;
use crewdesk_db::models::task::{CreateSubtask, CreateTask, Task, TaskDetail, UpdateTask};
use crewdesk_db::repositories::{AttachmentRepo, TaskRepo};
use serde::Deserialize;

use crate::activity;
use crate::error::{AppError, AppResult};
use crate::handlers::Deleted;
use crate::state::AppState;

/// Query parameters for task listing.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title is required".into(),
        )));
    }

    let task = TaskRepo::create(&state.pool, &input).await?;
    activity::record(&state, "created", ObjectType::Task, task.id).await;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks?project_id=N
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = match params.project_id {
        Some(project_id) => TaskRepo::list_by_project(&state.pool, project_id).await?,
        None => TaskRepo::list(&state.pool).await?,
    };
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
///
/// Embeds direct subtasks and attachment metadata.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskDetail>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    let subtasks = TaskRepo::list_subtasks(&state.pool, id).await?;
    let attachments = AttachmentRepo::list_by_task(&state.pool, id).await?;
    Ok(Json(TaskDetail {
        task,
        subtasks,
        attachments,
    }))
}

/// PUT /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No updatable fields provided".into(),
        )));
    }

    if let Some(Some(parent_id)) = input.parent_task_id {
        let links = TaskRepo::parent_links(&state.pool).await?;
        if creates_cycle(id, parent_id, &links) {
            return Err(AppError::Core(CoreError::Validation(
                "A task cannot be its own ancestor".into(),
            )));
        }
    }
    if let Some(Some(blocker_id)) = input.depends_on_task_id {
        let links = TaskRepo::dependency_links(&state.pool).await?;
        if creates_cycle(id, blocker_id, &links) {
            return Err(AppError::Core(CoreError::Validation(
                "Dependency chain may not loop back onto the task".into(),
            )));
        }
    }

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    activity::record(&state, "updated", ObjectType::Task, id).await;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
///
/// Cascades to the subtask subtree and its attachments. Tasks that depended
/// on the deleted one are left untouched, with a dangling reference.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Json<Deleted>> {
    let deleted = TaskRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    activity::record(&state, "deleted", ObjectType::Task, id).await;
    Ok(Json(Deleted {
        deleted: true,
        id: deleted,
    }))
}

/// POST /api/tasks/{id}/subtasks
///
/// Resolves `project_id` from the parent task, then delegates to task
/// creation with `parent_task_id` preset.
pub async fn create_subtask(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSubtask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let parent = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let create = CreateTask {
        project_id: parent.project_id,
        title: input.title,
        description: input.description,
        assigned_to: input.assigned_to,
        status: input.status,
        priority: input.priority,
        due_date: input.due_date,
        parent_task_id: Some(parent.id),
        depends_on_task_id: input.depends_on_task_id,
    };
    if create.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title is required".into(),
        )));
    }

    let task = TaskRepo::create(&state.pool, &create).await?;
    activity::record(&state, "created", ObjectType::Task, task.id).await;
    Ok((StatusCode::CREATED, Json(task)))
}
