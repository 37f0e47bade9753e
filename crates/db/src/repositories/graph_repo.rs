//! Aggregate and reduced-row queries backing the graph refresh and stats
//! endpoints.
//!
//! Each count is an independent read-only query; the data is approximate by
//! design, so no shared transaction is taken.

use sqlx::PgPool;

use crate::models::graph::{PriorityCount, ProjectRefreshRow, StatusCount, TaskRefreshRow};

/// Provides read-only queries for graph polling and statistics.
pub struct GraphRepo;

impl GraphRepo {
    /// Minimal project rows for the refresh endpoint.
    pub async fn project_refresh_rows(pool: &PgPool) -> Result<Vec<ProjectRefreshRow>, sqlx::Error> {
        sqlx::query_as::<_, ProjectRefreshRow>("SELECT id, name, status FROM projects")
            .fetch_all(pool)
            .await
    }

    /// Minimal task rows for the refresh endpoint.
    pub async fn task_refresh_rows(pool: &PgPool) -> Result<Vec<TaskRefreshRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskRefreshRow>("SELECT id, title, status, priority FROM tasks")
            .fetch_all(pool)
            .await
    }

    /// Project counts grouped by status.
    pub async fn project_status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS total FROM projects GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Task counts grouped by status.
    pub async fn task_status_counts(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS total FROM tasks GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    /// Task counts grouped by priority.
    pub async fn task_priority_counts(pool: &PgPool) -> Result<Vec<PriorityCount>, sqlx::Error> {
        sqlx::query_as::<_, PriorityCount>(
            "SELECT priority, COUNT(*) AS total FROM tasks GROUP BY priority",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of project->task edges (every task has one).
    pub async fn project_link_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE project_id IS NOT NULL")
            .fetch_one(pool)
            .await
    }

    /// Number of parent->subtask edges.
    pub async fn parent_link_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE parent_task_id IS NOT NULL")
            .fetch_one(pool)
            .await
    }

    /// Number of dependency edges. Counts stored references, including any
    /// left dangling by a deleted blocker.
    pub async fn dependency_link_count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE depends_on_task_id IS NOT NULL")
            .fetch_one(pool)
            .await
    }
}
