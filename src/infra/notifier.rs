use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::NotificationService;

/// Publishes notifications as JSON to a topic URL.
pub struct WebhookNotifier {
    http: Client,
    topic_url: String,
}

impl WebhookNotifier {
    pub fn new(topic_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            topic_url: topic_url.into(),
        }
    }
}

#[derive(Serialize)]
struct Notification<'a> {
    subject: &'a str,
    message: &'a str,
}

#[async_trait]
impl NotificationService for WebhookNotifier {
    async fn publish(&self, subject: &str, message: &str) -> AppResult<()> {
        let response = self
            .http
            .post(&self.topic_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&Notification { subject, message })
            .send()
            .await
            .map_err(|err| AppError::Notification(format!("failed to reach topic: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Rejected {
                service: "notification topic",
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
