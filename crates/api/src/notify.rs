//! Outbound Slack webhook sink.
//!
//! Delivery is best-effort: failures are reported to the operational log and
//! to the caller's response body, but never as a request error.

use std::time::Duration;

use serde_json::json;

/// Posts alert notifications to a Slack incoming webhook.
///
/// Cheaply cloneable; the inner `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl SlackNotifier {
    /// Build the notifier. Panics only at startup if the TLS backend cannot
    /// be initialized, which is the desired fail-fast behaviour.
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            webhook_url,
        }
    }

    /// Post one alert. Returns whether delivery succeeded.
    pub async fn send_alert(&self, alert_type: &str, title: &str, message: &str) -> bool {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::warn!("SLACK_WEBHOOK_URL not configured; dropping alert");
            return false;
        };

        let emoji = match alert_type {
            "error" => "\u{1f534}",
            "warning" => "\u{26a0}\u{fe0f}",
            "info" => "\u{1f535}",
            _ => "\u{1f514}",
        };
        let sent_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");

        let payload = json!({
            "blocks": [
                {
                    "type": "header",
                    "text": { "type": "plain_text", "text": format!("{emoji} {title}"), "emoji": true }
                },
                {
                    "type": "section",
                    "text": { "type": "mrkdwn", "text": format!("*Message:* {message}") }
                },
                {
                    "type": "section",
                    "fields": [
                        { "type": "mrkdwn", "text": format!("*Type:*\n{}", alert_type.to_uppercase()) },
                        { "type": "mrkdwn", "text": format!("*Time:*\n{sent_at}") }
                    ]
                }
            ]
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::error!(status = %resp.status(), "Slack webhook rejected alert");
                false
            }
            Err(err) => {
                tracing::error!(error = %err, "Slack webhook request failed");
                false
            }
        }
    }
}
