//! Reduced rows and aggregates backing the graph refresh/stats endpoints.

use crewdesk_core::types::DbId;
use sqlx::FromRow;

/// Minimal project row for the refresh endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRefreshRow {
    pub id: DbId,
    pub name: String,
    pub status: String,
}

/// Minimal task row for the refresh endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRefreshRow {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub priority: i32,
}

/// `COUNT(*)` grouped by a status column.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub total: i64,
}

/// `COUNT(*)` grouped by task priority.
#[derive(Debug, Clone, FromRow)]
pub struct PriorityCount {
    pub priority: i32,
    pub total: i64,
}
