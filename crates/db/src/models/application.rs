//! Drive application model.

use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `drive_applications` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DriveApplication {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub student_id: DbId,
    /// Job profiles the student was eligible for when applying.
    pub eligible_profiles: Vec<String>,
    pub applied_at: Timestamp,
}
