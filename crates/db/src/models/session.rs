//! Placement session model and DTOs.

use placement_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use placement_core::session::CreateSession;

/// A row from the `placement_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlacementSession {
    pub id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
