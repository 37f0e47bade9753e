//! Best-effort activity recording around entity mutations.

use crewdesk_core::activity::ObjectType;
use crewdesk_core::types::DbId;
use crewdesk_db::repositories::ActivityLogRepo;

use crate::state::AppState;

/// Append an activity entry after a successful mutation.
///
/// The audit trail must never fail the operation it describes: write errors
/// are reported to the operational log and swallowed. Called after the
/// primary statement has committed, so a crash in between loses at most the
/// log entry, never the mutation.
pub async fn record(state: &AppState, action_type: &str, object_type: ObjectType, object_id: DbId) {
    if let Err(err) = ActivityLogRepo::insert(
        &state.pool,
        state.config.actor_id,
        action_type,
        object_type.as_str(),
        object_id,
    )
    .await
    {
        tracing::warn!(
            error = %err,
            action_type,
            object_type = object_type.as_str(),
            object_id,
            "Failed to record activity entry",
        );
    }
}
