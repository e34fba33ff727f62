//! Placement round entity model and DTOs.

use placement_core::error::CoreError;
use placement_core::round::RoundStatus;
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use placement_core::round::{
    CreateRound, DeclareResults, RoundTransitionRequest, UpdateCohort, UpdateRound,
};

/// A row from the `placement_rounds` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlacementRound {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub round_number: i32,
    pub round_name: String,
    pub round_type: String,
    pub venue: String,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub round_duration_hours: Option<i32>,
    pub round_duration_minutes: Option<i32>,
    pub round_status: String,
    pub appeared_students: Vec<DbId>,
    pub selected_students: Vec<DbId>,
    pub result_message: Option<String>,
    pub result_description: Option<String>,
    pub result_declared_at: Option<Timestamp>,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlacementRound {
    /// Parsed round status.
    pub fn status(&self) -> Result<RoundStatus, CoreError> {
        RoundStatus::from_str_db(&self.round_status)
    }
}

/// Response for `GET /placement/{id}/rounds/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundDetails {
    pub rounds: Vec<PlacementRound>,
    /// Union of the appeared cohorts across all rounds.
    pub appeared_students: Vec<DbId>,
}

/// Response for `GET .../detailed-results`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedResults {
    pub round: PlacementRound,
    pub appeared: Vec<super::student::StudentSummary>,
    pub selected: Vec<super::student::StudentSummary>,
    pub not_selected: Vec<super::student::StudentSummary>,
    pub appeared_count: usize,
    pub selected_count: usize,
}
