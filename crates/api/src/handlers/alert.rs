//! Handler for the outbound Slack alert sink.

use axum::extract::State;
use axum::Json;
use crewdesk_core::activity::ObjectType;
use serde::{Deserialize, Serialize};

use crate::activity;
use crate::error::AppResult;
use crate::state::AppState;

/// Request body for posting an alert.
#[derive(Debug, Deserialize)]
pub struct SlackAlertRequest {
    #[serde(rename = "type")]
    pub alert_type: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Response body reporting the delivery outcome.
#[derive(Debug, Serialize)]
pub struct SlackAlertResponse {
    pub delivered: bool,
    pub message: &'static str,
}

/// POST /api/alerts/slack
///
/// Fire-and-forget: a delivery failure is reported in the body and the
/// server log, never as a request error.
pub async fn send_slack_alert(
    State(state): State<AppState>,
    Json(input): Json<SlackAlertRequest>,
) -> AppResult<Json<SlackAlertResponse>> {
    let alert_type = input.alert_type.as_deref().unwrap_or("info");
    let title = input.title.as_deref().unwrap_or("Alert");
    let message = input.message.as_deref().unwrap_or("No message provided");

    let delivered = state.notifier.send_alert(alert_type, title, message).await;
    if delivered {
        // Alerts have no entity row; the entry records the event itself.
        activity::record(&state, "slack_notification", ObjectType::Alert, 0).await;
    }

    Ok(Json(SlackAlertResponse {
        delivered,
        message: if delivered {
            "Alert sent to Slack"
        } else {
            "Alert delivery failed; see server logs"
        },
    }))
}
