//! Response records as the server serializes them.
//!
//! Request bodies and filters are shared with the server through
//! `placement_core`; these are the read side, decoded from JSON.

use placement_core::drive::{
    ApplicationDetails, BondDetails, CompanyDetails, EligibilityCriteria, JobProfile,
    PointOfContact,
};
use placement_core::student::{Academics, DebourDetails, PersonalInfo};
use placement_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementDrive {
    pub id: DbId,
    pub placement_drive_title: String,
    pub session_id: Option<DbId>,
    pub jnf_id: Option<DbId>,
    pub company_details: CompanyDetails,
    pub job_profiles: Vec<JobProfile>,
    pub eligibility_criteria: EligibilityCriteria,
    pub bond_details: BondDetails,
    pub point_of_contact: Vec<PointOfContact>,
    pub application_details: ApplicationDetails,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jnf {
    pub id: DbId,
    pub company_details: CompanyDetails,
    pub job_profiles: Vec<JobProfile>,
    pub eligibility_criteria: EligibilityCriteria,
    pub bond_details: BondDetails,
    pub point_of_contact: Vec<PointOfContact>,
    pub application_details: ApplicationDetails,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveApplication {
    pub id: DbId,
    pub placement_drive_id: DbId,
    pub student_id: DbId,
    pub eligible_profiles: Vec<String>,
    pub applied_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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
    /// Send back on the next write to detect concurrent edits.
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundDetails {
    pub rounds: Vec<PlacementRound>,
    pub appeared_students: Vec<DbId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedResults {
    pub round: PlacementRound,
    pub appeared: Vec<StudentSummary>,
    pub selected: Vec<StudentSummary>,
    pub not_selected: Vec<StudentSummary>,
    pub appeared_count: usize,
    pub selected_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: DbId,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub batch: String,
    pub cgpa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: DbId,
    pub personal_info: PersonalInfo,
    pub academics: Academics,
    pub is_deboured: bool,
    pub debour_details: DebourDetails,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebourStatus {
    pub student_id: DbId,
    pub is_deboured: bool,
    pub debour_details: DebourDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// An outbox row as listed by `GET /placement/{id}/notifications/outbox`.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementSession {
    pub id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
