//! Notification outbox model.

use placement_core::notification::OutboxEventType;
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;

use super::drive::PlacementDrive;
use super::round::PlacementRound;

/// A row from the `notification_outbox` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub attempts: i32,
    pub next_attempt_at: Timestamp,
    pub last_error: Option<String>,
    pub created_at: Timestamp,
    pub delivered_at: Option<Timestamp>,
}

/// A lifecycle event to record alongside the change that caused it.
#[derive(Debug, Clone)]
pub struct NewOutboxEvent {
    pub placement_drive_id: DbId,
    pub event_type: OutboxEventType,
    pub payload: serde_json::Value,
}

impl NewOutboxEvent {
    /// Start an event for a drive, carrying its title and company name.
    pub fn for_drive(drive: &PlacementDrive, event_type: OutboxEventType) -> Self {
        Self {
            placement_drive_id: drive.id,
            event_type,
            payload: json!({
                "drive_title": drive.placement_drive_title,
                "company_name": drive.company_details.name,
            }),
        }
    }

    /// Add the identifying fields of a round.
    pub fn with_round(self, round: &PlacementRound) -> Self {
        self.with_field("round_number", round.round_number)
            .with_field("round_name", round.round_name.as_str())
            .with_field("venue", round.venue.as_str())
    }

    /// Add a single payload field.
    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        if let Some(map) = self.payload.as_object_mut() {
            map.insert(key.to_string(), value.into());
        }
        self
    }
}
