use async_trait::async_trait;
use aws_sdk_sns::{error::DisplayErrorContext, Client as SnsClient};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{error, info};
use thiserror::Error;

use crate::models::EventRecord;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to publish notification: {0}")]
    PublishFailed(String),
}

/// Publishes announcements to subscribers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Returns the provider's message id.
    async fn publish(&self, subject: &str, message: &str) -> Result<String, NotifyError>;
}

/// Publishes to a single SNS topic
pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: String,
}

impl SnsNotifier {
    pub async fn new(topic_arn: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::with_client(SnsClient::new(&config), topic_arn)
    }

    pub fn with_client(client: SnsClient, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<String, NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to publish to SNS. Error: {}", DisplayErrorContext(&e));
                NotifyError::PublishFailed(DisplayErrorContext(&e).to_string())
            })?;

        let message_id = output.message_id.unwrap_or_default();
        info!(
            "Successfully published message to SNS. MessageId: {}",
            message_id
        );
        Ok(message_id)
    }
}

/// Parses an ISO date, naive datetime or RFC 3339 timestamp.
fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Subject line for a new event announcement.
pub fn event_subject(event: &EventRecord) -> String {
    format!("New Event: {}", event.title)
}

/// Renders the announcement body. Unparseable dates are shown as stored.
pub fn format_event_announcement(event: &EventRecord) -> String {
    let event_date = parse_iso(&event.date)
        .map(|d| d.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| event.date.clone());
    let created_at = parse_iso(&event.created_at)
        .map(|d| d.format("%B %d, %Y at %I:%M %p UTC").to_string())
        .unwrap_or_else(|| event.created_at.clone());

    let mut message = String::new();
    message.push_str("╔══════════════════════════════════════╗\n");
    message.push_str("             EVENT DETAILS\n");
    message.push_str("╚══════════════════════════════════════╝\n\n");
    message.push_str(&format!("📌 Title: {}\n", event.title));
    message.push_str(&format!("📅 Date: {}\n", event_date));
    if let Some(address) = &event.address {
        message.push_str(&format!("📍 Address: {}\n", address));
    }
    message.push_str(&format!("\n📝 Description:\n{}\n\n", event.description));
    message.push_str("ℹ️ Additional Information:\n");
    message.push_str(&format!("• Event ID: {}\n", event.event_id));
    if let Some(creator) = &event.creator_name {
        message.push_str(&format!("• Organizer: {}\n", creator));
    }
    message.push_str(&format!("• Created: {}\n\n", created_at));
    message.push_str("═══════════════════════════════════════\n");
    message
}
