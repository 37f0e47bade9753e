//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for partial updates, where needed
//!
//! Update DTOs use double-`Option` fields for nullable columns so an absent
//! key ("leave unchanged") is distinguishable from an explicit `null`
//! ("clear the column").

pub mod activity;
pub mod attachment;
pub mod chat;
pub mod graph;
pub mod project;
pub mod task;

use serde::{Deserialize, Deserializer};

/// Deserializer for patch-style fields: wraps any *present* value (including
/// `null`) in `Some`, so only an absent key deserializes to `None`.
///
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
