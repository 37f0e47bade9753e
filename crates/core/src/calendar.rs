//! Read-time status overlay for calendar views.

use chrono::NaiveDate;

/// Overlay the transient `overdue` status on a task that is past due and
/// not done. The stored status is never modified; this applies only to the
/// returned view.
pub fn effective_status<'a>(
    status: &'a str,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> &'a str {
    match due_date {
        Some(due) if due < today && status != "done" => "overdue",
        _ => status,
    }
}
