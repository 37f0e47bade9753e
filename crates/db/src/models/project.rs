//! Project entity model and DTOs.

use chrono::NaiveDate;
use crewdesk_core::graph::ProjectSnapshot;
use crewdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::task::Task;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Project> for ProjectSnapshot {
    fn from(p: &Project) -> Self {
        ProjectSnapshot {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status.clone(),
        }
    }
}

/// DTO for creating a new project. `status` defaults to `active`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// DTO for updating an existing project. Only the whitelisted fields below
/// are updatable; anything else in the request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub status: Option<String>,
}

impl UpdateProject {
    /// True when no whitelisted field is present in the request.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.status.is_none()
    }
}

/// A project with its tasks embedded, for single-project reads.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}
