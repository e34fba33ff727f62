//! Placement drive entity model and DTOs.

use placement_core::drive::{
    ApplicationDetails, BondDetails, CompanyDetails, DriveStatus, EligibilityCriteria,
    JobProfile, PointOfContact,
};
use placement_core::error::CoreError;
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

pub use placement_core::drive::{CreateDriveFromJnf, DriveFilter, UpdateDriveStatus};

/// A row from the `placement_drives` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlacementDrive {
    pub id: DbId,
    pub placement_drive_title: String,
    pub session_id: Option<DbId>,
    pub jnf_id: Option<DbId>,
    pub company_details: Json<CompanyDetails>,
    pub job_profiles: Json<Vec<JobProfile>>,
    pub eligibility_criteria: Json<EligibilityCriteria>,
    pub bond_details: Json<BondDetails>,
    pub point_of_contact: Json<Vec<PointOfContact>>,
    pub application_details: Json<ApplicationDetails>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlacementDrive {
    /// Parsed drive status.
    pub fn drive_status(&self) -> Result<DriveStatus, CoreError> {
        DriveStatus::from_str_db(&self.status)
    }
}
