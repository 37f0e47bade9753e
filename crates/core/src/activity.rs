//! Read-time correlation of activity entries with current entity state.
//!
//! Activity rows carry only a `(object_type, object_id)` pair and no foreign
//! key, so an entry outlives its subject. Enrichment resolves each pair
//! against lookup tables of *current* entity state; a missing subject (since
//! deleted) yields the variant's defaults rather than a dropped row. The
//! mapping is a tagged union per object type instead of SQL left-joins so it
//! stays explicit and testable without a database.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DbId;

/// Known activity subject discriminators.
///
/// Stored as free strings; unknown values simply carry no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Project,
    Task,
    Attachment,
    Chat,
    Event,
    Idea,
    System,
    Alert,
}

impl ObjectType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "project" => Some(Self::Project),
            "task" => Some(Self::Task),
            "attachment" => Some(Self::Attachment),
            "chat" => Some(Self::Chat),
            "event" => Some(Self::Event),
            "idea" => Some(Self::Idea),
            "system" => Some(Self::System),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Attachment => "attachment",
            Self::Chat => "chat",
            Self::Event => "event",
            Self::Idea => "idea",
            Self::System => "system",
            Self::Alert => "alert",
        }
    }
}

/// Current project state relevant to enrichment.
#[derive(Debug, Clone)]
pub struct ProjectRef {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// Current task state relevant to enrichment.
#[derive(Debug, Clone)]
pub struct TaskRef {
    pub description: Option<String>,
    pub status: String,
    pub priority: i32,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub project_id: DbId,
    pub project_name: String,
}

/// Current attachment state relevant to enrichment.
#[derive(Debug, Clone)]
pub struct AttachmentRef {
    pub filename: String,
    pub uploaded_by: Option<String>,
}

/// Current chat-message state relevant to enrichment.
#[derive(Debug, Clone)]
pub struct ChatRef {
    pub user_name: String,
    pub message: String,
}

/// Current-state lookup tables, keyed by entity id, one per joinable type.
#[derive(Debug, Default)]
pub struct EntityLookups {
    pub projects: HashMap<DbId, ProjectRef>,
    pub tasks: HashMap<DbId, TaskRef>,
    pub attachments: HashMap<DbId, AttachmentRef>,
    pub chats: HashMap<DbId, ChatRef>,
}

/// Type-specific derived fields attached to an enriched activity entry.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActivityDetail {
    Project {
        description: String,
        status: String,
        project_name: String,
    },
    Task {
        description: String,
        status: String,
        priority: i32,
        assigned_to: String,
        due_date: Option<NaiveDate>,
        project_id: Option<DbId>,
        project_name: String,
    },
    Attachment {
        description: String,
        uploaded_by: String,
    },
    Chat {
        description: String,
        user_name: String,
    },
}

/// Resolve the detail fields for one activity entry.
///
/// Returns `None` for object types that carry no joinable detail. For
/// joinable types whose subject has been deleted, returns the variant with
/// defaulted fields so the entry still renders.
pub fn correlate(
    object_type: ObjectType,
    object_id: DbId,
    lookups: &EntityLookups,
) -> Option<ActivityDetail> {
    match object_type {
        ObjectType::Project => Some(match lookups.projects.get(&object_id) {
            Some(p) => ActivityDetail::Project {
                description: p.description.clone().unwrap_or_default(),
                status: p.status.clone(),
                project_name: p.name.clone(),
            },
            None => ActivityDetail::Project {
                description: String::new(),
                status: String::new(),
                project_name: String::new(),
            },
        }),
        ObjectType::Task => Some(match lookups.tasks.get(&object_id) {
            Some(t) => ActivityDetail::Task {
                description: t.description.clone().unwrap_or_default(),
                status: t.status.clone(),
                priority: t.priority,
                assigned_to: t.assigned_to.clone().unwrap_or_default(),
                due_date: t.due_date,
                project_id: Some(t.project_id),
                project_name: t.project_name.clone(),
            },
            None => ActivityDetail::Task {
                description: String::new(),
                status: "todo".to_string(),
                priority: 3,
                assigned_to: String::new(),
                due_date: None,
                project_id: None,
                project_name: String::new(),
            },
        }),
        ObjectType::Attachment => Some(match lookups.attachments.get(&object_id) {
            Some(a) => ActivityDetail::Attachment {
                description: format!("File: {}", a.filename),
                uploaded_by: a.uploaded_by.clone().unwrap_or_default(),
            },
            None => ActivityDetail::Attachment {
                description: String::new(),
                uploaded_by: String::new(),
            },
        }),
        ObjectType::Chat => Some(match lookups.chats.get(&object_id) {
            Some(c) => ActivityDetail::Chat {
                description: c.message.clone(),
                user_name: c.user_name.clone(),
            },
            None => ActivityDetail::Chat {
                description: String::new(),
                user_name: "Unknown".to_string(),
            },
        }),
        ObjectType::Event | ObjectType::Idea | ObjectType::System | ObjectType::Alert => None,
    }
}
