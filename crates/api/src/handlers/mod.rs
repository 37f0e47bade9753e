//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the corresponding repository in
//! `crewdesk_db`, record a best-effort activity entry after successful
//! mutations, and map errors via [`AppError`](crate::error::AppError).

pub mod activity;
pub mod alert;
pub mod attachment;
pub mod calendar;
pub mod chat;
pub mod graph;
pub mod project;
pub mod task;

use crewdesk_core::types::DbId;
use serde::Serialize;

/// Confirmation body for delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
    pub id: DbId,
}
