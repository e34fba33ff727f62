//! Outbox dispatcher.
//!
//! [`OutboxDispatcher`] claims due outbox events, renders each into a drive
//! notification, stores it, and hands it to every configured
//! [`DeliveryChannel`]. A failure reschedules the event with exponential
//! backoff; once the attempt budget is spent, or a channel reports a
//! permanent rejection, the event is marked dead and waits for a manual
//! retry.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use placement_core::notification::{
    is_exhausted, render_event, retry_delay, OutboxEventType, DEFAULT_MAX_ATTEMPTS,
};
use placement_db::models::outbox::OutboxEvent;
use placement_db::repositories::{NotificationRepo, OutboxRepo};
use placement_db::DbPool;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::bus::{PlatformEvent, OUTBOX_ENQUEUED};
use crate::delivery::{DeliveryChannel, DeliveryError};

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Fallback polling interval when no wake-up arrives.
    pub poll_interval: Duration,
    /// Maximum events claimed per pass.
    pub batch_size: i64,
    /// Attempts before an event is marked dead.
    pub max_attempts: i32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(15),
            batch_size: 25,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Outcome counts of a single dispatch pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub rescheduled: usize,
    pub dead: usize,
}

#[derive(Debug, thiserror::Error)]
enum DispatchError {
    #[error("Unknown outbox event type '{0}'")]
    UnknownEventType(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{channel} delivery failed: {source}")]
    Delivery {
        channel: &'static str,
        source: DeliveryError,
    },
}

impl DispatchError {
    fn is_permanent(&self) -> bool {
        match self {
            Self::UnknownEventType(_) => true,
            Self::Database(_) => false,
            Self::Delivery { source, .. } => source.is_permanent(),
        }
    }
}

pub struct OutboxDispatcher {
    pool: DbPool,
    channels: Vec<Arc<dyn DeliveryChannel>>,
    config: DispatcherConfig,
}

impl OutboxDispatcher {
    pub fn new(pool: DbPool, config: DispatcherConfig) -> Self {
        Self {
            pool,
            channels: Vec::new(),
            config,
        }
    }

    /// Add an external delivery channel.
    pub fn with_channel(mut self, channel: Arc<dyn DeliveryChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Run the dispatch loop until `cancel` fires.
    ///
    /// A pass runs on every poll tick and whenever an
    /// [`OUTBOX_ENQUEUED`] event arrives on the bus.
    pub async fn run(
        &self,
        mut receiver: broadcast::Receiver<PlatformEvent>,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        tracing::info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            channels = self.channels.len(),
            "Outbox dispatcher started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Outbox dispatcher cancelled");
                    break;
                }
                _ = interval.tick() => {}
                received = receiver.recv() => match received {
                    Ok(event) if event.event_type == OUTBOX_ENQUEUED => {}
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Outbox dispatcher lagged behind the event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, outbox dispatcher shutting down");
                        break;
                    }
                },
            }

            if let Err(e) = self.dispatch_due().await {
                tracing::error!(error = %e, "Outbox dispatch pass failed");
            }
        }
    }

    /// Claim and process every due event, one batch at a time.
    pub async fn dispatch_due(&self) -> Result<DispatchSummary, sqlx::Error> {
        let mut summary = DispatchSummary::default();
        loop {
            let batch = OutboxRepo::claim_due(&self.pool, self.config.batch_size).await?;
            if batch.is_empty() {
                break;
            }
            let full = batch.len() as i64 >= self.config.batch_size;
            for event in &batch {
                self.settle(event, &mut summary).await?;
            }
            if !full {
                break;
            }
        }

        if summary != DispatchSummary::default() {
            tracing::info!(
                delivered = summary.delivered,
                rescheduled = summary.rescheduled,
                dead = summary.dead,
                "Outbox dispatch pass finished"
            );
        }
        Ok(summary)
    }

    /// Process one event and record the outcome.
    async fn settle(
        &self,
        event: &OutboxEvent,
        summary: &mut DispatchSummary,
    ) -> Result<(), sqlx::Error> {
        let error = match self.process(event).await {
            Ok(()) => {
                OutboxRepo::mark_delivered(&self.pool, event.id).await?;
                summary.delivered += 1;
                return Ok(());
            }
            Err(e) => e,
        };

        let attempts = event.attempts + 1;
        let message = error.to_string();
        let give_up = error.is_permanent() || is_exhausted(attempts, self.config.max_attempts);

        if give_up {
            tracing::error!(
                outbox_id = event.id,
                attempts,
                error = %message,
                "Outbox event marked dead"
            );
            OutboxRepo::mark_dead(&self.pool, event.id, &message).await?;
            summary.dead += 1;
        } else {
            let retry_at = Utc::now() + retry_delay(attempts);
            tracing::warn!(
                outbox_id = event.id,
                attempts,
                %retry_at,
                error = %message,
                "Outbox event delivery failed, rescheduled"
            );
            OutboxRepo::mark_failed(&self.pool, event.id, &message, retry_at).await?;
            summary.rescheduled += 1;
        }
        Ok(())
    }

    async fn process(&self, event: &OutboxEvent) -> Result<(), DispatchError> {
        let event_type = OutboxEventType::from_str_db(&event.event_type)
            .map_err(|_| DispatchError::UnknownEventType(event.event_type.clone()))?;
        let rendered = render_event(event_type, &event.payload);

        let created = NotificationRepo::create_from_outbox(
            &self.pool,
            event.placement_drive_id,
            event.id,
            &rendered,
        )
        .await?;
        if created {
            tracing::debug!(outbox_id = event.id, event_type = %event.event_type, "Notification stored");
        }

        for channel in &self.channels {
            channel
                .deliver(event, &rendered)
                .await
                .map_err(|source| DispatchError::Delivery {
                    channel: channel.name(),
                    source,
                })?;
        }
        Ok(())
    }
}
