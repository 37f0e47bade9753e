//! Handlers for the `/graph` resource.
//!
//! Every response is derived on demand from a snapshot read of the project
//! and task tables; no graph state is persisted anywhere.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use crewdesk_core::error::CoreError;
use crewdesk_core::graph::{
    build_graph, parse_node_key, GraphView, NodeKind, ProjectSnapshot, TaskSnapshot,
};
use crewdesk_core::types::{DbId, Timestamp};
use crewdesk_db::repositories::{GraphRepo, ProjectRepo, TaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/graph
///
/// Full node/edge view for visualization.
pub async fn full(State(state): State<AppState>) -> AppResult<Json<GraphView>> {
    let projects = ProjectRepo::list_by_name(&state.pool).await?;
    let tasks = TaskRepo::list_by_priority(&state.pool).await?;

    let project_snapshots: Vec<ProjectSnapshot> = projects.iter().map(Into::into).collect();
    let task_snapshots: Vec<TaskSnapshot> = tasks.iter().map(Into::into).collect();

    Ok(Json(build_graph(&project_snapshots, &task_snapshots)))
}

/// Minimal project node for cheap polling.
#[derive(Debug, Serialize)]
pub struct ProjectRefreshNode {
    pub id: String,
    pub label: String,
    pub status: String,
}

/// Minimal task node for cheap polling.
#[derive(Debug, Serialize)]
pub struct TaskRefreshNode {
    pub id: String,
    pub label: String,
    pub status: String,
    pub priority: i32,
}

/// Response body for the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub projects: Vec<ProjectRefreshNode>,
    pub tasks: Vec<TaskRefreshNode>,
    pub timestamp: Timestamp,
}

/// GET /api/graph/refresh
///
/// Ids, labels, and status/priority only; no edges, no metadata.
pub async fn refresh(State(state): State<AppState>) -> AppResult<Json<RefreshResponse>> {
    let projects = GraphRepo::project_refresh_rows(&state.pool)
        .await?
        .into_iter()
        .map(|p| ProjectRefreshNode {
            id: format!("project-{}", p.id),
            label: p.name,
            status: p.status,
        })
        .collect();

    let tasks = GraphRepo::task_refresh_rows(&state.pool)
        .await?
        .into_iter()
        .map(|t| TaskRefreshNode {
            id: format!("task-{}", t.id),
            label: t.title,
            status: t.status,
            priority: t.priority,
        })
        .collect();

    Ok(Json(RefreshResponse {
        projects,
        tasks,
        timestamp: Utc::now(),
    }))
}

/// Counts grouped by status for one entity table.
#[derive(Debug, Serialize)]
pub struct StatusBreakdown {
    pub total: i64,
    pub by_status: BTreeMap<String, i64>,
}

/// Edge totals by relation type.
#[derive(Debug, Serialize)]
pub struct EdgeStats {
    pub project_tasks: i64,
    pub subtasks: i64,
    pub dependencies: i64,
    pub total: i64,
}

/// Response body for the stats endpoint.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub projects: StatusBreakdown,
    pub tasks: StatusBreakdown,
    pub priorities: BTreeMap<String, i64>,
    pub edges: EdgeStats,
}

/// GET /api/graph/stats
///
/// Each count is an independent read-only aggregate; slight staleness
/// between them is acceptable.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<GraphStats>> {
    let project_counts = GraphRepo::project_status_counts(&state.pool).await?;
    let task_counts = GraphRepo::task_status_counts(&state.pool).await?;
    let priority_counts = GraphRepo::task_priority_counts(&state.pool).await?;

    let project_tasks = GraphRepo::project_link_count(&state.pool).await?;
    let subtasks = GraphRepo::parent_link_count(&state.pool).await?;
    let dependencies = GraphRepo::dependency_link_count(&state.pool).await?;

    let projects = StatusBreakdown {
        total: project_counts.iter().map(|c| c.total).sum(),
        by_status: project_counts
            .into_iter()
            .map(|c| (c.status, c.total))
            .collect(),
    };
    let tasks = StatusBreakdown {
        total: task_counts.iter().map(|c| c.total).sum(),
        by_status: task_counts
            .into_iter()
            .map(|c| (c.status, c.total))
            .collect(),
    };
    let priorities = priority_counts
        .into_iter()
        .map(|c| (format!("priority_{}", c.priority), c.total))
        .collect();

    Ok(Json(GraphStats {
        projects,
        tasks,
        priorities,
        edges: EdgeStats {
            project_tasks,
            subtasks,
            dependencies,
            total: project_tasks + subtasks + dependencies,
        },
    }))
}

/// Detail body for one graph node, keyed by `<type>-<id>`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeDetail {
    Project {
        id: DbId,
        name: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: String,
        task_count: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    },
    Task {
        id: DbId,
        title: String,
        description: Option<String>,
        status: String,
        priority: i32,
        assigned_to: Option<String>,
        due_date: Option<NaiveDate>,
        project_id: DbId,
        project_name: String,
        parent_task_id: Option<DbId>,
        depends_on_task_id: Option<DbId>,
        subtask_count: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    },
}

/// GET /api/graph/node/{key}
///
/// Single-entity detail enriched with one derived count: `task_count` for
/// projects, `subtask_count` for tasks.
pub async fn node_detail(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<NodeDetail>> {
    let (kind, id) = parse_node_key(&key)?;

    match kind {
        NodeKind::Project => {
            let project = ProjectRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Project",
                    id,
                }))?;
            let task_count = ProjectRepo::task_count(&state.pool, id).await?;
            Ok(Json(NodeDetail::Project {
                id: project.id,
                name: project.name,
                description: project.description,
                start_date: project.start_date,
                end_date: project.end_date,
                status: project.status,
                task_count,
                created_at: project.created_at,
                updated_at: project.updated_at,
            }))
        }
        NodeKind::Task => {
            let task = TaskRepo::find_by_id(&state.pool, id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
            let subtask_count = TaskRepo::subtask_count(&state.pool, id).await?;
            let project_name = ProjectRepo::find_by_id(&state.pool, task.project_id)
                .await?
                .map(|p| p.name)
                .unwrap_or_default();
            Ok(Json(NodeDetail::Task {
                id: task.id,
                title: task.title,
                description: task.description,
                status: task.status,
                priority: task.priority,
                assigned_to: task.assigned_to,
                due_date: task.due_date,
                project_id: task.project_id,
                project_name,
                parent_task_id: task.parent_task_id,
                depends_on_task_id: task.depends_on_task_id,
                subtask_count,
                created_at: task.created_at,
                updated_at: task.updated_at,
            }))
        }
    }
}
