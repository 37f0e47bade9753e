//! Repository for the `projects` table.

use chrono::NaiveDate;
use crewdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::ProjectRefRow;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, start_date, end_date, status, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, start_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List all projects ordered by name, for graph assembly.
    pub async fn list_by_name(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY name");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Apply the whitelisted fields present in `input` and advance
    /// `updated_at`. Returns `None` if no row with the given `id` exists.
    ///
    /// With an empty update set this performs no write and returns the
    /// current row; callers reject that case before getting here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut binds: Vec<BindValue> = Vec::new();
        let mut idx = 2u32; // $1 is the row id

        if let Some(ref name) = input.name {
            sets.push(format!("name = ${idx}"));
            idx += 1;
            binds.push(BindValue::Text(name.clone()));
        }
        if let Some(ref description) = input.description {
            sets.push(format!("description = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptText(description.clone()));
        }
        if let Some(start_date) = input.start_date {
            sets.push(format!("start_date = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptDate(start_date));
        }
        if let Some(end_date) = input.end_date {
            sets.push(format!("end_date = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptDate(end_date));
        }
        if let Some(ref status) = input.status {
            sets.push(format!("status = ${idx}"));
            binds.push(BindValue::Text(status.clone()));
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE projects SET {}, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);
        for val in binds {
            match val {
                BindValue::Text(v) => q = q.bind(v),
                BindValue::OptText(v) => q = q.bind(v),
                BindValue::OptDate(v) => q = q.bind(v),
            }
        }
        q.fetch_optional(pool).await
    }

    /// Delete a project by ID, cascading to its tasks and their attachments.
    /// Returns the deleted id, or `None` if no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("DELETE FROM projects WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch current-state rows for activity enrichment.
    pub async fn lookup_refs(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ProjectRefRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectRefRow>(
            "SELECT id, name, description, status FROM projects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Number of tasks owned by a project, for node details.
    pub async fn task_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

/// Typed bind value for the dynamically-built UPDATE statement.
enum BindValue {
    Text(String),
    OptText(Option<String>),
    OptDate(Option<NaiveDate>),
}
