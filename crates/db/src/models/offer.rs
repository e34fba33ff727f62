//! Offer letter model and DTOs.

use placement_core::error::CoreError;
use placement_core::offer::OfferStatus;
use placement_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use placement_core::offer::{CreateOfferLetter, RespondToOffer};

/// A row from the `offer_letters` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OfferLetter {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub student_id: DbId,
    pub status: String,
    pub content: String,
    pub expiry_date: Option<Date>,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OfferLetter {
    pub fn offer_status(&self) -> Result<OfferStatus, CoreError> {
        OfferStatus::from_str_db(&self.status)
    }
}
