//! Step definitions and required-field validation for the two multi-step
//! forms: the placement drive wizard and the JNF wizard.
//!
//! Validators return the full list of messages for a step so the caller can
//! show a single message or a bulleted list. An empty list means the step
//! may advance.

use serde::{Deserialize, Serialize};

use crate::drive::{
    is_valid_email, is_valid_mobile, validate_profile_ids, ApplicationDetails, BondDetails,
    CompanyDetails, EligibilityCriteria, JobProfile, PlacementDriveDraft, PointOfContact,
};
use crate::error::CoreError;
use crate::jnf::JnfDraft;

/// Maximum CGPA on the institute scale.
pub const MAX_CGPA: f64 = 10.0;

// ---------------------------------------------------------------------------
// Placement drive wizard
// ---------------------------------------------------------------------------

/// The five steps of the placement drive wizard (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveWizardStep {
    CompanyDetails,
    JobProfiles,
    Eligibility,
    SelectionProcess,
    ContactsAndApplication,
}

impl DriveWizardStep {
    pub const ALL: [DriveWizardStep; 5] = [
        Self::CompanyDetails,
        Self::JobProfiles,
        Self::Eligibility,
        Self::SelectionProcess,
        Self::ContactsAndApplication,
    ];

    /// Convert a 0-based step index to a step.
    pub fn from_index(n: u8) -> Result<Self, CoreError> {
        Self::ALL.get(n as usize).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid step {n}. Must be between 0 and {}",
                Self::ALL.len() - 1
            ))
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyDetails => "Company Details",
            Self::JobProfiles => "Job Profiles",
            Self::Eligibility => "Eligibility",
            Self::SelectionProcess => "Selection Process",
            Self::ContactsAndApplication => "Contacts & Application",
        }
    }
}

/// Validate one step of the drive wizard.
pub fn validate_drive_step(step: DriveWizardStep, draft: &PlacementDriveDraft) -> Vec<String> {
    let mut errors = Vec::new();
    match step {
        DriveWizardStep::CompanyDetails => {
            if draft.placement_drive_title.trim().is_empty() {
                errors.push("Placement drive title is required".to_string());
            }
            check_company(&draft.company_details, false, &mut errors);
        }
        DriveWizardStep::JobProfiles => check_profiles(&draft.job_profiles, &mut errors),
        DriveWizardStep::Eligibility => check_eligibility(
            &draft.job_profiles,
            &draft.eligibility_criteria,
            &mut errors,
        ),
        DriveWizardStep::SelectionProcess => check_selection(&draft.job_profiles, &mut errors),
        DriveWizardStep::ContactsAndApplication => {
            check_contacts(&draft.point_of_contact, &mut errors);
            check_bond(&draft.bond_details, &mut errors);
            check_application(&draft.application_details, true, &mut errors);
        }
    }
    errors
}

/// Validate every step of the drive wizard before the final submission.
pub fn validate_drive_draft(draft: &PlacementDriveDraft) -> Result<(), CoreError> {
    let errors = DriveWizardStep::ALL
        .iter()
        .flat_map(|step| validate_drive_step(*step, draft))
        .collect();
    CoreError::from_messages(errors)
}

// ---------------------------------------------------------------------------
// JNF wizard
// ---------------------------------------------------------------------------

/// The four steps of the JNF wizard (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JnfWizardStep {
    CompanyDetails,
    JobProfiles,
    EligibilityAndSelection,
    ContactsAndBond,
}

impl JnfWizardStep {
    pub const ALL: [JnfWizardStep; 4] = [
        Self::CompanyDetails,
        Self::JobProfiles,
        Self::EligibilityAndSelection,
        Self::ContactsAndBond,
    ];

    /// Convert a 0-based step index to a step.
    pub fn from_index(n: u8) -> Result<Self, CoreError> {
        Self::ALL.get(n as usize).copied().ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid step {n}. Must be between 0 and {}",
                Self::ALL.len() - 1
            ))
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyDetails => "Company Details",
            Self::JobProfiles => "Job Profiles",
            Self::EligibilityAndSelection => "Eligibility & Selection",
            Self::ContactsAndBond => "Contacts & Bond",
        }
    }
}

/// Validate one step of the JNF wizard.
pub fn validate_jnf_step(step: JnfWizardStep, jnf: &JnfDraft) -> Vec<String> {
    let mut errors = Vec::new();
    match step {
        JnfWizardStep::CompanyDetails => check_company(&jnf.company_details, true, &mut errors),
        JnfWizardStep::JobProfiles => check_profiles(&jnf.job_profiles, &mut errors),
        JnfWizardStep::EligibilityAndSelection => {
            check_eligibility(&jnf.job_profiles, &jnf.eligibility_criteria, &mut errors);
            check_selection(&jnf.job_profiles, &mut errors);
        }
        JnfWizardStep::ContactsAndBond => {
            check_contacts(&jnf.point_of_contact, &mut errors);
            check_bond(&jnf.bond_details, &mut errors);
            check_application(&jnf.application_details, false, &mut errors);
        }
    }
    errors
}

/// Validate every step of the JNF wizard.
pub fn validate_jnf(jnf: &JnfDraft) -> Result<(), CoreError> {
    let errors = JnfWizardStep::ALL
        .iter()
        .flat_map(|step| validate_jnf_step(*step, jnf))
        .collect();
    CoreError::from_messages(errors)
}

// ---------------------------------------------------------------------------
// Shared section checks
// ---------------------------------------------------------------------------

fn check_company(company: &CompanyDetails, email_required: bool, errors: &mut Vec<String>) {
    if company.name.trim().is_empty() {
        errors.push("Company name is required".to_string());
    }
    let email = company.email.trim();
    if email.is_empty() {
        if email_required {
            errors.push("Company email is required".to_string());
        }
    } else if !is_valid_email(email) {
        errors.push("Company email is not a valid email address".to_string());
    }
}

fn check_profiles(profiles: &[JobProfile], errors: &mut Vec<String>) {
    if profiles.is_empty() {
        errors.push("At least one job profile is required".to_string());
        return;
    }
    for (idx, profile) in profiles.iter().enumerate() {
        let n = idx + 1;
        if profile.designation.trim().is_empty() {
            errors.push(format!("Job profile {n}: designation is required"));
        }
        match profile.job_type {
            None => errors.push(format!("Job profile {n}: job type is required")),
            Some(job_type) => {
                if job_type.needs_ctc() && is_blank(&profile.ctc) {
                    errors.push(format!("Job profile {n}: CTC is required"));
                }
                if job_type.needs_stipend() && is_blank(&profile.stipend) {
                    errors.push(format!("Job profile {n}: stipend is required"));
                }
            }
        }
    }
    // Blank IDs are assigned on submission; only clashes are reported here.
    let with_ids: Vec<JobProfile> = profiles
        .iter()
        .filter(|p| !p.profile_id.trim().is_empty())
        .cloned()
        .collect();
    if let Err(CoreError::Validation(msg)) = validate_profile_ids(&with_ids) {
        errors.extend(msg.split("; ").map(str::to_string));
    }
}

fn check_eligibility(
    profiles: &[JobProfile],
    criteria: &EligibilityCriteria,
    errors: &mut Vec<String>,
) {
    if let Some(cgpa) = criteria.min_cgpa {
        if !(0.0..=MAX_CGPA).contains(&cgpa) {
            errors.push(format!("Minimum CGPA must be between 0 and {MAX_CGPA}"));
        }
    }
    for (idx, profile) in profiles.iter().enumerate() {
        if profile.eligible_branches.eligible_count() == 0 {
            errors.push(format!(
                "Job profile {}: select at least one eligible branch",
                idx + 1
            ));
        }
    }
}

fn check_selection(profiles: &[JobProfile], errors: &mut Vec<String>) {
    for (idx, profile) in profiles.iter().enumerate() {
        let n = idx + 1;
        let process = &profile.selection_process;
        if process.rounds.is_empty() {
            errors.push(format!(
                "Job profile {n}: add at least one selection round"
            ));
        }
        if process
            .rounds
            .iter()
            .any(|r| r.round_name.trim().is_empty())
        {
            errors.push(format!("Job profile {n}: every selection round needs a name"));
        }
        if process.expected_recruits.is_some_and(|r| r <= 0) {
            errors.push(format!(
                "Job profile {n}: expected recruits must be a positive number"
            ));
        }
    }
}

fn check_contacts(contacts: &[PointOfContact], errors: &mut Vec<String>) {
    if contacts.is_empty() {
        errors.push("At least one point of contact is required".to_string());
        return;
    }
    for (idx, contact) in contacts.iter().enumerate() {
        let n = idx + 1;
        if contact.name.trim().is_empty() {
            errors.push(format!("Point of contact {n}: name is required"));
        }
        if !is_valid_mobile(&contact.mobile) {
            errors.push(format!("Point of contact {n}: mobile number is invalid"));
        }
        if !is_valid_email(&contact.email) {
            errors.push(format!("Point of contact {n}: email is invalid"));
        }
    }
}

fn check_bond(bond: &BondDetails, errors: &mut Vec<String>) {
    if bond.has_bond && bond.details.trim().is_empty() {
        errors.push("Bond details are required when the offer carries a bond".to_string());
    }
}

fn check_application(
    application: &ApplicationDetails,
    deadline_required: bool,
    errors: &mut Vec<String>,
) {
    if deadline_required && application.application_deadline.is_none() {
        errors.push("Application deadline is required".to_string());
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
