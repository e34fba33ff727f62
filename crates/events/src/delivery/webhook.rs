//! Webhook delivery.
//!
//! [`WebhookDelivery`] POSTs each rendered notification as JSON to a fixed
//! URL. It makes a single attempt per call; retries are scheduled by the
//! outbox dispatcher with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use placement_core::notification::RenderedNotification;
use placement_db::models::outbox::OutboxEvent;

use super::{DeliveryChannel, DeliveryError};

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

impl WebhookError {
    /// A 4xx answer means the endpoint rejected the payload; sending the
    /// same body again will not change that.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::HttpStatus(400..=499))
    }
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

pub struct WebhookDelivery {
    client: reqwest::Client,
    url: String,
}

impl WebhookDelivery {
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, payload: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

/// JSON body sent to the webhook.
pub fn webhook_body(event: &OutboxEvent, rendered: &RenderedNotification) -> serde_json::Value {
    serde_json::json!({
        "outbox_id": event.id,
        "event_type": event.event_type,
        "placement_drive_id": event.placement_drive_id,
        "subject": rendered.subject,
        "content": rendered.content,
        "notification_type": rendered.notification_type.as_str(),
        "payload": event.payload,
        "created_at": event.created_at,
    })
}

#[async_trait]
impl DeliveryChannel for WebhookDelivery {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(
        &self,
        event: &OutboxEvent,
        rendered: &RenderedNotification,
    ) -> Result<(), DeliveryError> {
        let body = webhook_body(event, rendered);
        self.try_send(&body).await.map_err(|e| {
            tracing::warn!(url = %self.url, outbox_id = event.id, error = %e, "Webhook delivery failed");
            DeliveryError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use placement_core::notification::NotificationType;

    #[test]
    fn new_keeps_url() {
        let delivery = WebhookDelivery::new("http://localhost:9/hook").unwrap();
        assert_eq!(delivery.url(), "http://localhost:9/hook");
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = WebhookError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
    }

    #[test]
    fn client_errors_are_permanent() {
        assert!(WebhookError::HttpStatus(400).is_permanent());
        assert!(WebhookError::HttpStatus(422).is_permanent());
        assert!(!WebhookError::HttpStatus(500).is_permanent());
        assert!(!WebhookError::HttpStatus(503).is_permanent());
        assert!(!WebhookError::HttpStatus(302).is_permanent());
    }

    #[test]
    fn body_carries_event_and_rendering() {
        let event = OutboxEvent {
            id: 5,
            placement_drive_id: 9,
            event_type: "offer.sent".into(),
            payload: serde_json::json!({"student_name": "Asha"}),
            status: "pending".into(),
            attempts: 0,
            next_attempt_at: Utc::now(),
            last_error: None,
            created_at: Utc::now(),
            delivered_at: None,
        };
        let rendered = RenderedNotification {
            subject: "Offer".into(),
            content: "<p>Hi</p>".into(),
            notification_type: NotificationType::Result,
        };
        let body = webhook_body(&event, &rendered);
        assert_eq!(body["outbox_id"], 5);
        assert_eq!(body["placement_drive_id"], 9);
        assert_eq!(body["notification_type"], "result");
        assert_eq!(body["payload"]["student_name"], "Asha");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let delivery = WebhookDelivery::new("http://127.0.0.1:9/hook").unwrap();
        let err = delivery
            .try_send(&serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, WebhookError::Request(_)));
        assert!(!err.is_permanent());
    }
}
