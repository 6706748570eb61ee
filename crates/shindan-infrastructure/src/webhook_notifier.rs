//! Webhook implementation of the booking notification channel.
//!
//! Delivers accepted bookings to the operator as a JSON POST. The payload
//! carries both the structured fields and a preformatted body so simple
//! webhook-to-mail bridges can forward it verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use shindan_core::booking::{BookingRecord, Notifier, NotifyOutcome};
use shindan_core::{Result, ShindanError};

use crate::notify_config::NotifyConfig;

/// Delivered payload shape.
#[derive(Debug, Serialize)]
struct NotifyPayload<'a> {
    recipient: &'a str,
    subject: String,
    body: String,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    address: &'a str,
    detail: &'a str,
}

/// [`Notifier`] that POSTs bookings to a configured webhook endpoint.
///
/// With no endpoint configured, delivery is skipped with a warning instead
/// of failing; missing operator configuration must never block a user's
/// booking.
pub struct WebhookNotifier {
    client: Client,
    config: NotifyConfig,
}

impl WebhookNotifier {
    pub fn new(config: NotifyConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Loads the channel configuration from its default location.
    pub fn from_default_config() -> Result<Self> {
        Ok(Self::new(NotifyConfig::load()?))
    }

    fn payload<'a>(&'a self, record: &'a BookingRecord) -> NotifyPayload<'a> {
        let body = format!(
            "新しい修理予約が入りました。\n\n\
             ■お名前: {}\n\
             ■電話番号: {}\n\
             ■メールアドレス: {}\n\
             ■ご住所: {}\n\
             ■症状詳細:\n{}\n",
            record.name, record.phone, record.email, record.address, record.detail
        );
        NotifyPayload {
            recipient: &self.config.recipient,
            subject: format!("【修理予約】{}様からの依頼", record.name),
            body,
            name: &record.name,
            phone: &record.phone,
            email: &record.email,
            address: &record.address,
            detail: &record.detail,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, record: &BookingRecord) -> Result<NotifyOutcome> {
        if !self.config.is_configured() {
            tracing::warn!("notification channel is not configured; skipping delivery");
            return Ok(NotifyOutcome::Skipped);
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.payload(record))
            .send()
            .await
            .map_err(|e| ShindanError::notification(format!("delivery request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShindanError::notification(format!(
                "delivery endpoint returned {status}"
            )));
        }

        tracing::info!(endpoint = %self.config.endpoint, "booking notification delivered");
        Ok(NotifyOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BookingRecord {
        BookingRecord {
            name: "Tanaka".to_string(),
            phone: "090-1111-2222".to_string(),
            email: "tanaka@example.com".to_string(),
            address: "Osaki".to_string(),
            detail: "起動が遅い".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_channel_skips_delivery() {
        let notifier = WebhookNotifier::new(NotifyConfig::default());
        let outcome = notifier.notify(&record()).await.unwrap();
        assert_eq!(outcome, NotifyOutcome::Skipped);
    }

    #[test]
    fn test_payload_contains_subject_and_fields() {
        let notifier = WebhookNotifier::new(NotifyConfig {
            endpoint: "https://hooks.example.com/b".to_string(),
            recipient: "ops@example.com".to_string(),
            timeout_secs: 30,
        });
        let record = record();
        let payload = notifier.payload(&record);

        assert_eq!(payload.subject, "【修理予約】Tanaka様からの依頼");
        assert_eq!(payload.recipient, "ops@example.com");
        assert!(payload.body.contains("090-1111-2222"));
        assert!(payload.body.contains("起動が遅い"));
    }
}
