//! Derivation of the project/task visualization graph.
//!
//! The graph is never persisted: [`build_graph`] is a pure function over a
//! snapshot of the `projects` and `tasks` tables, so there is no cache to
//! invalidate and freshness is capped at read time. Dependency references
//! may dangle (the blocking task can be deleted out from under them); those
//! edges are skipped rather than surfaced.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Node color by task status. Unmapped statuses render gray.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "todo" => "#3b82f6",
        "in_progress" => "#f59e0b",
        "done" => "#10b981",
        "blocked" => "#ef4444",
        "overdue" => "#dc2626",
        _ => "#6b7280",
    }
}

/// Accent color by task priority (1 = urgent .. 5 = minimal).
///
/// Out-of-range priorities fall back to the medium color.
pub fn priority_color(priority: i32) -> &'static str {
    match priority {
        1 => "#e53e3e",
        2 => "#fb923c",
        3 => "#fbbf24",
        4 => "#60a5fa",
        5 => "#9ca3af",
        _ => "#fbbf24",
    }
}

/// Project fields the graph builder consumes.
#[derive(Debug, Clone)]
pub struct ProjectSnapshot {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: String,
}

/// Task fields the graph builder consumes.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: i32,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub parent_task_id: Option<DbId>,
    pub depends_on_task_id: Option<DbId>,
}

/// A renderable graph node, one per project or task.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphNode {
    Project {
        id: String,
        label: String,
        description: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        status: String,
    },
    Task {
        id: String,
        label: String,
        status: String,
        color: &'static str,
        priority: i32,
        priority_color: &'static str,
        description: Option<String>,
        assigned_to: Option<String>,
        due_date: Option<NaiveDate>,
        project_id: DbId,
        parent_task_id: Option<DbId>,
        depends_on_task_id: Option<DbId>,
    },
}

impl GraphNode {
    /// The composite node key (`project-<id>` or `task-<id>`).
    pub fn key(&self) -> &str {
        match self {
            GraphNode::Project { id, .. } | GraphNode::Task { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    BelongsTo,
    Subtask,
    DependsOn,
}

/// A typed, directed edge between two graph nodes.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub label: &'static str,
}

/// The full derived graph view.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Assemble the graph from current entity snapshots.
///
/// Emits one node per project and per task, a `belongs_to` edge for every
/// task, a `subtask` edge for every parent link, and a `depends_on` edge for
/// every dependency link whose blocking task still exists in the snapshot.
/// Parent links are FK-enforced and need no existence check; dependency
/// links are unconstrained and may dangle.
pub fn build_graph(projects: &[ProjectSnapshot], tasks: &[TaskSnapshot]) -> GraphView {
    let task_ids: HashSet<DbId> = tasks.iter().map(|t| t.id).collect();

    let mut nodes = Vec::with_capacity(projects.len() + tasks.len());
    let mut edges = Vec::new();

    for project in projects {
        nodes.push(GraphNode::Project {
            id: format!("project-{}", project.id),
            label: project.name.clone(),
            description: project.description.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            status: project.status.clone(),
        });
    }

    for task in tasks {
        nodes.push(GraphNode::Task {
            id: format!("task-{}", task.id),
            label: task.title.clone(),
            status: task.status.clone(),
            color: status_color(&task.status),
            priority: task.priority,
            priority_color: priority_color(task.priority),
            description: task.description.clone(),
            assigned_to: task.assigned_to.clone(),
            due_date: task.due_date,
            project_id: task.project_id,
            parent_task_id: task.parent_task_id,
            depends_on_task_id: task.depends_on_task_id,
        });

        edges.push(GraphEdge {
            id: format!("edge-project-{}-task-{}", task.project_id, task.id),
            source: format!("project-{}", task.project_id),
            target: format!("task-{}", task.id),
            kind: EdgeKind::BelongsTo,
            label: "belongs to",
        });

        if let Some(parent_id) = task.parent_task_id {
            edges.push(GraphEdge {
                id: format!("edge-parent-{}-child-{}", parent_id, task.id),
                source: format!("task-{parent_id}"),
                target: format!("task-{}", task.id),
                kind: EdgeKind::Subtask,
                label: "subtask",
            });
        }

        if let Some(dep_id) = task.depends_on_task_id {
            if task_ids.contains(&dep_id) {
                edges.push(GraphEdge {
                    id: format!("edge-depends-{}-on-{}", dep_id, task.id),
                    source: format!("task-{dep_id}"),
                    target: format!("task-{}", task.id),
                    kind: EdgeKind::DependsOn,
                    label: "blocks",
                });
            }
        }
    }

    GraphView { nodes, edges }
}

/// Which entity table a composite node key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Project,
    Task,
}

/// Parse a composite node key of the form `project-<id>` or `task-<id>`.
pub fn parse_node_key(key: &str) -> Result<(NodeKind, DbId), CoreError> {
    let invalid = || CoreError::Validation(format!("Invalid node key: {key}"));

    let (kind, id) = key.split_once('-').ok_or_else(invalid)?;
    if id.contains('-') {
        return Err(invalid());
    }
    let id: DbId = id.parse().map_err(|_| invalid())?;

    match kind {
        "project" => Ok((NodeKind::Project, id)),
        "task" => Ok((NodeKind::Task, id)),
        _ => Err(invalid()),
    }
}
