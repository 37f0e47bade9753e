//! Repository for the `tasks` table.

use chrono::NaiveDate;
use crewdesk_core::hierarchy::LinkMap;
use crewdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::TaskRefRow;
use crate::models::task::{CalendarTask, CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, project_id, title, description, assigned_to, status, priority, \
    due_date, parent_task_id, depends_on_task_id, created_at, updated_at";

/// Provides CRUD operations for tasks, plus the link queries backing the
/// hierarchy cycle checks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// `status` defaults to `todo` and `priority` to 3 when omitted.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, title, description, assigned_to, status, priority,
                 due_date, parent_task_id, depends_on_task_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'todo'), COALESCE($6, 3), $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.assigned_to)
            .bind(&input.status)
            .bind(input.priority)
            .bind(input.due_date)
            .bind(input.parent_task_id)
            .bind(input.depends_on_task_id)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY created_at DESC");
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// List the tasks of one project in creation order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the direct subtasks of a task in creation order.
    pub async fn list_subtasks(pool: &PgPool, parent_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE parent_task_id = $1 ORDER BY created_at");
        sqlx::query_as::<_, Task>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// List all tasks ordered by (priority, title), for graph assembly.
    /// Presentation order only.
    pub async fn list_by_priority(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks ORDER BY priority, title");
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    /// Apply the whitelisted fields present in `input` and advance
    /// `updated_at`. Returns `None` if no row with the given `id` exists.
    ///
    /// `project_id` is not updatable. With an empty update set this performs
    /// no write and returns the current row; callers reject that case before
    /// getting here.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut binds: Vec<BindValue> = Vec::new();
        let mut idx = 2u32; // $1 is the row id

        if let Some(ref title) = input.title {
            sets.push(format!("title = ${idx}"));
            idx += 1;
            binds.push(BindValue::Text(title.clone()));
        }
        if let Some(ref description) = input.description {
            sets.push(format!("description = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptText(description.clone()));
        }
        if let Some(ref assigned_to) = input.assigned_to {
            sets.push(format!("assigned_to = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptText(assigned_to.clone()));
        }
        if let Some(ref status) = input.status {
            sets.push(format!("status = ${idx}"));
            idx += 1;
            binds.push(BindValue::Text(status.clone()));
        }
        if let Some(priority) = input.priority {
            sets.push(format!("priority = ${idx}"));
            idx += 1;
            binds.push(BindValue::Int(priority));
        }
        if let Some(due_date) = input.due_date {
            sets.push(format!("due_date = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptDate(due_date));
        }
        if let Some(parent_task_id) = input.parent_task_id {
            sets.push(format!("parent_task_id = ${idx}"));
            idx += 1;
            binds.push(BindValue::OptId(parent_task_id));
        }
        if let Some(depends_on_task_id) = input.depends_on_task_id {
            sets.push(format!("depends_on_task_id = ${idx}"));
            binds.push(BindValue::OptId(depends_on_task_id));
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let query = format!(
            "UPDATE tasks SET {}, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);
        for val in binds {
            match val {
                BindValue::Text(v) => q = q.bind(v),
                BindValue::OptText(v) => q = q.bind(v),
                BindValue::Int(v) => q = q.bind(v),
                BindValue::OptDate(v) => q = q.bind(v),
                BindValue::OptId(v) => q = q.bind(v),
            }
        }
        q.fetch_optional(pool).await
    }

    /// Delete a task by ID, cascading to its subtask subtree and their
    /// attachments. Tasks depending on the deleted one are left with a
    /// dangling reference. Returns the deleted id, or `None` if no row
    /// matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("DELETE FROM tasks WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The `child -> parent` link table, for cycle checks.
    pub async fn parent_links(pool: &PgPool) -> Result<LinkMap, sqlx::Error> {
        let rows: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT id, parent_task_id FROM tasks WHERE parent_task_id IS NOT NULL",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// The `dependent -> blocker` link table, for cycle checks.
    pub async fn dependency_links(pool: &PgPool) -> Result<LinkMap, sqlx::Error> {
        let rows: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT id, depends_on_task_id FROM tasks WHERE depends_on_task_id IS NOT NULL",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Number of direct subtasks, for node details.
    pub async fn subtask_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE parent_task_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Due-dated tasks for calendar views, ordered by due date. With both
    /// bounds present the range is inclusive.
    pub async fn list_due(
        pool: &PgPool,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<CalendarTask>, sqlx::Error> {
        match (from, to) {
            (Some(from), Some(to)) => {
                sqlx::query_as::<_, CalendarTask>(
                    "SELECT id, title, assigned_to, status, due_date FROM tasks
                     WHERE due_date BETWEEN $1 AND $2 ORDER BY due_date",
                )
                .bind(from)
                .bind(to)
                .fetch_all(pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, CalendarTask>(
                    "SELECT id, title, assigned_to, status, due_date FROM tasks
                     WHERE due_date IS NOT NULL ORDER BY due_date",
                )
                .fetch_all(pool)
                .await
            }
        }
    }

    /// Fetch current-state rows (with owning project name) for activity
    /// enrichment.
    pub async fn lookup_refs(pool: &PgPool, ids: &[DbId]) -> Result<Vec<TaskRefRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskRefRow>(
            "SELECT t.id, t.description, t.status, t.priority, t.assigned_to,
                    t.due_date, t.project_id, p.name AS project_name
             FROM tasks t
             JOIN projects p ON t.project_id = p.id
             WHERE t.id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}

/// Typed bind value for the dynamically-built UPDATE statement.
enum BindValue {
    Text(String),
    OptText(Option<String>),
    Int(i32),
    OptDate(Option<NaiveDate>),
    OptId(Option<DbId>),
}
