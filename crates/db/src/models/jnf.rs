//! JNF entity model and DTOs.

use placement_core::drive::{
    ApplicationDetails, BondDetails, CompanyDetails, EligibilityCriteria, JobProfile,
    PointOfContact,
};
use placement_core::error::CoreError;
use placement_core::jnf::{JnfDraft, JnfStatus};
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

pub use placement_core::jnf::ReviewJnf;

/// A row from the `jnfs` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Jnf {
    pub id: DbId,
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

impl Jnf {
    pub fn jnf_status(&self) -> Result<JnfStatus, CoreError> {
        JnfStatus::from_str_db(&self.status)
    }

    /// The form content without row metadata.
    pub fn draft(&self) -> JnfDraft {
        JnfDraft {
            company_details: self.company_details.0.clone(),
            job_profiles: self.job_profiles.0.clone(),
            eligibility_criteria: self.eligibility_criteria.0.clone(),
            bond_details: self.bond_details.0.clone(),
            point_of_contact: self.point_of_contact.0.clone(),
            application_details: self.application_details.0.clone(),
        }
    }
}
