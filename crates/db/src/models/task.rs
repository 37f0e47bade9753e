//! Task entity model and DTOs.
//!
//! Tasks carry two self-relations with different deletion semantics:
//! `parent_task_id` cascades (deleting a task removes its subtask subtree),
//! `depends_on_task_id` does not (deleting the blocking task leaves the
//! dependent's reference dangling).

use chrono::NaiveDate;
use crewdesk_core::graph::TaskSnapshot;
use crewdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attachment::AttachmentMeta;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: i32,
    pub due_date: Option<NaiveDate>,
    pub parent_task_id: Option<DbId>,
    pub depends_on_task_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Task> for TaskSnapshot {
    fn from(t: &Task) -> Self {
        TaskSnapshot {
            id: t.id,
            title: t.title.clone(),
            description: t.description.clone(),
            status: t.status.clone(),
            priority: t.priority,
            assigned_to: t.assigned_to.clone(),
            due_date: t.due_date,
            project_id: t.project_id,
            parent_task_id: t.parent_task_id,
            depends_on_task_id: t.depends_on_task_id,
        }
    }
}

/// DTO for creating a new task.
///
/// `status` defaults to `todo` and `priority` to 3 when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub parent_task_id: Option<DbId>,
    pub depends_on_task_id: Option<DbId>,
}

/// DTO for the subtask-creation shortcut: `project_id` is inherited from the
/// parent task and `parent_task_id` from the URL, so neither is accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubtask {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub depends_on_task_id: Option<DbId>,
}

/// DTO for updating an existing task.
///
/// `project_id` is deliberately absent: a task belongs to one project for
/// its lifetime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub assigned_to: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub parent_task_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub depends_on_task_id: Option<Option<DbId>>,
}

impl UpdateTask {
    /// True when no whitelisted field is present in the request.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.parent_task_id.is_none()
            && self.depends_on_task_id.is_none()
    }
}

/// A task with its subtasks and attachment metadata embedded, for
/// single-task reads.
#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub subtasks: Vec<Task>,
    pub attachments: Vec<AttachmentMeta>,
}

/// Reduced task row for calendar views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CalendarTask {
    pub id: DbId,
    pub title: String,
    pub assigned_to: Option<String>,
    pub status: String,
    pub due_date: Option<NaiveDate>,
}
