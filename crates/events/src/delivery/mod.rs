//! External delivery channels for automatic notifications.
//!
//! The stored drive notification is written by the dispatcher itself;
//! channels here push a copy outside the portal. A channel error makes the
//! dispatcher reschedule the whole outbox event, so channels must tolerate
//! receiving the same event more than once. A permanent error
//! ([`DeliveryError::is_permanent`]) marks the event dead at once.

use async_trait::async_trait;
use placement_core::notification::RenderedNotification;
use placement_db::models::outbox::OutboxEvent;

pub mod webhook;

use webhook::WebhookError;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("{0}")]
    Other(String),
}

impl DeliveryError {
    /// Whether the dispatcher should stop retrying the event.
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::Webhook(e) => e.is_permanent(),
            Self::Other(_) => false,
        }
    }
}

/// A destination for rendered notifications.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn deliver(
        &self,
        event: &OutboxEvent,
        rendered: &RenderedNotification,
    ) -> Result<(), DeliveryError>;
}
