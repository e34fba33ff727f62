//! Job Notification Forms (JNF).
//!
//! A JNF is the intake form a company fills in. Admins turn an approved JNF
//! into a placement drive with [`drive_draft_from_jnf`], which copies the
//! structured sections over instead of asking the admin to re-enter them.

use serde::{Deserialize, Serialize};

use crate::drive::{
    assign_missing_profile_ids, ApplicationDetails, BondDetails, CompanyDetails,
    EligibilityCriteria, JobProfile, PlacementDriveDraft, PointOfContact,
};
use crate::error::CoreError;
use crate::types::DbId;

/// Review status of a submitted JNF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JnfStatus {
    Submitted,
    Approved,
    Rejected,
}

impl JnfStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid JNF status '{s}'. Must be one of: submitted, approved, rejected"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Reviews are final: only a submitted JNF can be approved or rejected.
    pub fn review(self, decision: JnfStatus) -> Result<JnfStatus, CoreError> {
        match (self, decision) {
            (Self::Submitted, Self::Approved | Self::Rejected) => Ok(decision),
            (_, Self::Submitted) => Err(CoreError::Validation(
                "A JNF cannot be moved back to 'submitted'".to_string(),
            )),
            (current, _) => Err(CoreError::Conflict(format!(
                "JNF has already been {}",
                current.as_str()
            ))),
        }
    }
}

/// Everything collected by the JNF wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JnfDraft {
    pub company_details: CompanyDetails,
    pub job_profiles: Vec<JobProfile>,
    pub eligibility_criteria: EligibilityCriteria,
    pub bond_details: BondDetails,
    pub point_of_contact: Vec<PointOfContact>,
    pub application_details: ApplicationDetails,
}

/// Build a drive draft from a JNF.
///
/// Profiles keep their eligibility and selection process; profiles without
/// an ID get one so the drive can reference them. When `title` is `None`
/// the drive is named after the company.
pub fn drive_draft_from_jnf(
    jnf_id: DbId,
    jnf: &JnfDraft,
    title: Option<String>,
    session_id: Option<DbId>,
) -> PlacementDriveDraft {
    let mut job_profiles = jnf.job_profiles.clone();
    assign_missing_profile_ids(&mut job_profiles);

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} Placement Drive", jnf.company_details.name.trim()));

    PlacementDriveDraft {
        placement_drive_title: title,
        session_id,
        jnf_id: Some(jnf_id),
        company_details: jnf.company_details.clone(),
        job_profiles,
        eligibility_criteria: jnf.eligibility_criteria.clone(),
        bond_details: jnf.bond_details.clone(),
        point_of_contact: jnf.point_of_contact.clone(),
        application_details: jnf.application_details.clone(),
    }
}

/// DTO for `PUT /jnf/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewJnf {
    pub status: JnfStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::{BranchEntry, EligibleBranches, SelectionProcess, SelectionStage};
    use assert_matches::assert_matches;

    fn sample_jnf() -> JnfDraft {
        JnfDraft {
            company_details: CompanyDetails {
                name: "Acme".into(),
                email: "hr@acme.com".into(),
                ..Default::default()
            },
            job_profiles: vec![JobProfile {
                designation: "SDE".into(),
                eligible_branches: EligibleBranches {
                    btech: vec![BranchEntry {
                        name: "CSE".into(),
                        specialization: None,
                        eligible: true,
                    }],
                    ..Default::default()
                },
                selection_process: SelectionProcess {
                    rounds: vec![SelectionStage {
                        round_number: 1,
                        round_name: "Online Test".into(),
                        details: String::new(),
                    }],
                    expected_recruits: Some(4),
                    tentative_date: None,
                },
                ..Default::default()
            }],
            eligibility_criteria: EligibilityCriteria {
                min_cgpa: Some(7.0),
                backlog_allowed: false,
                other_eligibility: String::new(),
            },
            point_of_contact: vec![PointOfContact {
                name: "Jo".into(),
                designation: "HR".into(),
                mobile: "9876543210".into(),
                email: "jo@acme.com".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn cascade_copies_every_section() {
        let jnf = sample_jnf();
        let draft = drive_draft_from_jnf(7, &jnf, Some("Acme 2025".into()), Some(3));

        assert_eq!(draft.placement_drive_title, "Acme 2025");
        assert_eq!(draft.jnf_id, Some(7));
        assert_eq!(draft.session_id, Some(3));
        assert_eq!(draft.company_details, jnf.company_details);
        assert_eq!(draft.eligibility_criteria.min_cgpa, Some(7.0));
        assert_eq!(draft.point_of_contact, jnf.point_of_contact);

        let profile = &draft.job_profiles[0];
        assert_eq!(profile.profile_id, "profile-1");
        assert!(profile.eligible_branches.is_department_eligible("cse"));
        assert_eq!(profile.selection_process.rounds[0].round_name, "Online Test");
    }

    #[test]
    fn cascade_defaults_title_to_company_name() {
        let draft = drive_draft_from_jnf(1, &sample_jnf(), Some("   ".into()), None);
        assert_eq!(draft.placement_drive_title, "Acme Placement Drive");
    }

    #[test]
    fn review_is_final() {
        assert_eq!(
            JnfStatus::Submitted.review(JnfStatus::Approved).unwrap(),
            JnfStatus::Approved
        );
        assert_matches!(
            JnfStatus::Approved.review(JnfStatus::Rejected),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            JnfStatus::Submitted.review(JnfStatus::Submitted),
            Err(CoreError::Validation(_))
        );
    }
}
