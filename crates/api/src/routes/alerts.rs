//! Route definitions for outbound alert notifications.
//!
//! ```text
//! POST /slack   post an alert to the configured Slack webhook
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::alert;
use crate::state::AppState;

/// Routes mounted at `/alerts`.
pub fn router() -> Router<AppState> {
    Router::new().route("/slack", post(alert::send_slack_alert))
}
