//! Drive notification model.

use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub subject: String,
    pub content: String,
    pub notification_type: String,
    pub origin: String,
    pub outbox_id: Option<DbId>,
    pub created_at: Timestamp,
}
