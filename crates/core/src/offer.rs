//! Offer letter lifecycle.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Status values for an offer letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl OfferStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            _ => Err(CoreError::Validation(format!(
                "Invalid offer status '{s}'. Must be one of: pending, accepted, rejected, expired"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

/// Result of a student's response to an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferResponse {
    /// The response is recorded with the contained status.
    Recorded(OfferStatus),
    /// The offer lapsed before the response; it must be marked expired.
    Lapsed,
}

/// Decide the outcome of a response made on `today`.
///
/// An offer is still open on its expiry date and lapses the day after.
pub fn respond(
    status: OfferStatus,
    expiry_date: Option<Date>,
    accept: bool,
    today: Date,
) -> Result<OfferResponse, CoreError> {
    if status != OfferStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Offer has already been {}",
            status.as_str()
        )));
    }
    if is_lapsed(expiry_date, today) {
        return Ok(OfferResponse::Lapsed);
    }
    Ok(OfferResponse::Recorded(if accept {
        OfferStatus::Accepted
    } else {
        OfferStatus::Rejected
    }))
}

/// Whether an offer with this expiry date has lapsed on `today`.
pub fn is_lapsed(expiry_date: Option<Date>, today: Date) -> bool {
    expiry_date.is_some_and(|d| today > d)
}

/// DTO for `POST /placement/{id}/offer-letters`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOfferLetter {
    pub student_id: DbId,
    #[validate(length(min = 1, message = "Offer letter content is required"))]
    pub content: String,
    pub expiry_date: Option<Date>,
}

/// DTO for `PUT /placement/{id}/offer-letters/{offer_id}/respond`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToOffer {
    pub accept: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn day(d: u32) -> Date {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[test]
    fn status_strings_roundtrip() {
        for status in [
            OfferStatus::Pending,
            OfferStatus::Accepted,
            OfferStatus::Rejected,
            OfferStatus::Expired,
        ] {
            assert_eq!(OfferStatus::from_str_db(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn pending_offer_can_be_answered_until_expiry() {
        assert_eq!(
            respond(OfferStatus::Pending, Some(day(10)), true, day(10)).unwrap(),
            OfferResponse::Recorded(OfferStatus::Accepted)
        );
        assert_eq!(
            respond(OfferStatus::Pending, None, false, day(30)).unwrap(),
            OfferResponse::Recorded(OfferStatus::Rejected)
        );
        assert_eq!(
            respond(OfferStatus::Pending, Some(day(10)), true, day(11)).unwrap(),
            OfferResponse::Lapsed
        );
    }

    #[test]
    fn answered_offer_is_final() {
        assert_matches!(
            respond(OfferStatus::Accepted, None, false, day(1)),
            Err(CoreError::Conflict(_))
        );
    }
}
