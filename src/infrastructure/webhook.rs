//! Outbound alert delivery

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::shared::errors::DispatchError;

const ALERT_HEADER: &str = "🏠 Apartment Price Alert";

#[derive(Debug, Serialize)]
struct WebhookPayload {
    text: String,
    timestamp: DateTime<Utc>,
}

impl WebhookPayload {
    fn from_alerts(alerts: &[String]) -> Self {
        Self {
            text: format!("{}\n{}", ALERT_HEADER, alerts.join("\n")),
            timestamp: Utc::now(),
        }
    }
}

/// Delivers a run's alert batch as a single JSON POST. Without a configured
/// endpoint the batch is logged locally and delivery counts as successful.
pub struct AlertDispatcher {
    http_client: Client,
    webhook_url: Option<String>,
}

impl AlertDispatcher {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            webhook_url,
        }
    }

    pub async fn send(&self, alerts: &[String]) -> Result<(), DispatchError> {
        let Some(url) = &self.webhook_url else {
            for alert in alerts {
                info!("No webhook configured. Alert: {}", alert);
            }
            return Ok(());
        };

        let payload = WebhookPayload::from_alerts(alerts);
        let response = self.http_client.post(url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(DispatchError::Status(response.status()));
        }

        info!("✅ Delivered {} alerts to webhook", alerts.len());
        Ok(())
    }
}
