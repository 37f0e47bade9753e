//! Handlers for the `/calendar` resource.
//!
//! The range listing overlays the transient `overdue` status on tasks past
//! their due date; the stored status is never modified.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use crewdesk_core::calendar::effective_status;
use crewdesk_core::error::CoreError;
use crewdesk_core::types::DbId;
use crewdesk_db::models::task::CalendarTask;
use crewdesk_db::repositories::TaskRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for the calendar range listing.
#[derive(Debug, Deserialize)]
pub struct CalendarRangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Single-task calendar view.
#[derive(Debug, Serialize)]
pub struct CalendarTaskDetail {
    pub id: DbId,
    pub title: String,
    pub assigned_to: Option<String>,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub priority: i32,
}

/// GET /api/calendar/tasks?from=YYYY-MM-DD&to=YYYY-MM-DD
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<CalendarRangeParams>,
) -> AppResult<Json<Vec<CalendarTask>>> {
    let mut tasks = TaskRepo::list_due(&state.pool, params.from, params.to).await?;

    let today = Utc::now().date_naive();
    for task in &mut tasks {
        task.status = effective_status(&task.status, task.due_date, today).to_string();
    }

    Ok(Json(tasks))
}

/// GET /api/calendar/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CalendarTaskDetail>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    Ok(Json(CalendarTaskDetail {
        id: task.id,
        title: task.title,
        assigned_to: task.assigned_to,
        status: task.status,
        due_date: task.due_date,
        description: task.description,
        priority: task.priority,
    }))
}
