//! Round lifecycle for placement drives.
//!
//! A round moves strictly forward: `upcoming -> ongoing -> completed`.
//! [`RoundStatus::transition_to`] is the only place where a status change is
//! accepted or refused; handlers and repositories never assign a status
//! string directly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Round status
// ---------------------------------------------------------------------------

/// Status values for a selection round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Upcoming,
    Ongoing,
    Completed,
}

/// Outcome of a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The round already has the requested status; nothing to write.
    Unchanged,
    /// The round moves to the contained status.
    Advance(RoundStatus),
}

impl RoundStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid round status '{s}'. Must be one of: upcoming, ongoing, completed"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    /// The single status this one may advance to, if any.
    pub fn next(self) -> Option<RoundStatus> {
        match self {
            Self::Upcoming => Some(Self::Ongoing),
            Self::Ongoing => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    /// Validate a requested status change.
    pub fn transition_to(self, target: RoundStatus) -> Result<Transition, CoreError> {
        if self == target {
            return Ok(Transition::Unchanged);
        }
        match (self, target) {
            (Self::Upcoming, Self::Ongoing) | (Self::Ongoing, Self::Completed) => {
                Ok(Transition::Advance(target))
            }
            (Self::Completed, _) => Err(CoreError::Validation(format!(
                "Round is completed and cannot move to '{}'",
                target.as_str()
            ))),
            (from, to) => Err(CoreError::Validation(format!(
                "Cannot move a round from '{}' to '{}'",
                from.as_str(),
                to.as_str()
            ))),
        }
    }

    /// Whether the cohort of selected students may still change.
    pub fn accepts_selection_changes(self) -> bool {
        !matches!(self, Self::Completed)
    }

    /// Whether results may be declared (or re-declared) in this status.
    pub fn accepts_results(self) -> bool {
        matches!(self, Self::Ongoing | Self::Completed)
    }
}

/// Ensure a round's stored version matches the version the caller edited.
pub fn check_version(round_id: i64, stored: i32, expected: i32) -> Result<(), CoreError> {
    if stored != expected {
        return Err(CoreError::Conflict(format!(
            "Round {round_id} was modified by someone else (version {stored}, you sent {expected}). \
             Reload the round and try again."
        )));
    }
    Ok(())
}

/// Number assigned to a new round appended after `existing_rounds` rounds.
pub fn next_round_number(existing_rounds: i64) -> i32 {
    i32::try_from(existing_rounds + 1).unwrap_or(i32::MAX)
}

/// Validate the editable scheduling fields of a round.
pub fn validate_round_fields(
    round_name: &str,
    duration_hours: Option<i32>,
    duration_minutes: Option<i32>,
    start_time: Option<crate::types::Timestamp>,
    end_time: Option<crate::types::Timestamp>,
) -> Result<(), CoreError> {
    let mut errors = Vec::new();
    if round_name.trim().is_empty() {
        errors.push("Round name is required".to_string());
    }
    if duration_hours.is_some_and(|h| h < 0) {
        errors.push("Round duration hours cannot be negative".to_string());
    }
    if duration_minutes.is_some_and(|m| !(0..60).contains(&m)) {
        errors.push("Round duration minutes must be between 0 and 59".to_string());
    }
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end <= start {
            errors.push("Round end time must be after its start time".to_string());
        }
    }
    CoreError::from_messages(errors)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// DTO for `POST /placement/{id}/add-round`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRound {
    pub round_name: String,
    #[serde(default)]
    pub round_type: String,
    #[serde(default)]
    pub venue: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub round_duration_hours: Option<i32>,
    pub round_duration_minutes: Option<i32>,
}

/// DTO for `PUT .../update-round`.
///
/// Carries the complete intended round: every editable field is
/// overwritten. `version` must be the version the caller last read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRound {
    pub round_name: String,
    #[serde(default)]
    pub round_type: String,
    #[serde(default)]
    pub venue: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub round_duration_hours: Option<i32>,
    pub round_duration_minutes: Option<i32>,
    pub round_status: Option<RoundStatus>,
    pub version: i32,
}

/// Body for the start/complete actions. The version check is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundTransitionRequest {
    pub version: Option<i32>,
}

/// DTO for the appeared/selected cohort updates (replace semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCohort {
    pub student_ids: Vec<DbId>,
    #[serde(default)]
    pub version: Option<i32>,
}

/// DTO for `PUT .../declare-results`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclareResults {
    pub result_message: String,
    #[serde(default)]
    pub result_description: String,
    #[serde(default)]
    pub version: Option<i32>,
}
