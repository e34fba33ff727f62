//! Placement drive domain types.
//!
//! A drive describes one company's recruitment process. Each job profile is
//! a single aggregate that owns its branch eligibility and its selection
//! process, so the three can never drift apart.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::{Date, DbId};

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 -]{8,14}[0-9]$").expect("valid regex"));

/// Whether a contact mobile number looks dialable.
pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile.trim())
}

/// Email check used by the wizards; the same rule as `#[validate(email)]`.
pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

// ---------------------------------------------------------------------------
// Drive status
// ---------------------------------------------------------------------------

/// Lifecycle of a placement drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveStatus {
    InProgress,
    Closed,
    Hold,
}

impl DriveStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            "hold" => Ok(Self::Hold),
            _ => Err(CoreError::Validation(format!(
                "Invalid drive status '{s}'. Must be one of: in_progress, closed, hold"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
            Self::Hold => "hold",
        }
    }

    /// Whether students may still apply.
    pub fn accepts_applications(self) -> bool {
        matches!(self, Self::InProgress)
    }
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    pub name: String,
    pub email: String,
    pub website: String,
    pub company_type: String,
    pub domain: String,
    pub description: String,
}

/// Kind of position offered by a job profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    Internship,
    InternshipWithPpo,
}

impl JobType {
    /// Internships pay a stipend; full-time roles carry a CTC.
    pub fn needs_stipend(self) -> bool {
        matches!(self, Self::Internship | Self::InternshipWithPpo)
    }

    pub fn needs_ctc(self) -> bool {
        matches!(self, Self::FullTime | Self::InternshipWithPpo)
    }
}

/// One branch (department/specialization) and whether it may apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchEntry {
    pub name: String,
    pub specialization: Option<String>,
    pub eligible: bool,
}

/// Branch eligibility grouped by programme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibleBranches {
    pub btech: Vec<BranchEntry>,
    pub mtech: Vec<BranchEntry>,
    pub msc: Vec<BranchEntry>,
    pub phd: Vec<BranchEntry>,
}

impl EligibleBranches {
    fn all(&self) -> impl Iterator<Item = &BranchEntry> {
        self.btech
            .iter()
            .chain(self.mtech.iter())
            .chain(self.msc.iter())
            .chain(self.phd.iter())
    }

    /// Number of branches marked eligible across all programmes.
    pub fn eligible_count(&self) -> usize {
        self.all().filter(|b| b.eligible).count()
    }

    /// Whether a student department matches an eligible branch.
    ///
    /// Matching is case-insensitive on the branch name.
    pub fn is_department_eligible(&self, department: &str) -> bool {
        let department = department.trim();
        self.all()
            .any(|b| b.eligible && b.name.trim().eq_ignore_ascii_case(department))
    }
}

/// One stage announced in a profile's selection process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionStage {
    pub round_number: i32,
    pub round_name: String,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionProcess {
    pub rounds: Vec<SelectionStage>,
    pub expected_recruits: Option<i32>,
    pub tentative_date: Option<Date>,
}

/// A job profile together with its eligibility and selection process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    pub profile_id: String,
    pub designation: String,
    pub course: String,
    pub job_type: Option<JobType>,
    pub ctc: Option<String>,
    pub take_home: Option<String>,
    pub stipend: Option<String>,
    pub place_of_posting: String,
    pub job_description: String,
    pub perks: String,
    pub training_period: Option<String>,
    pub intern_duration: Option<String>,
    pub eligible_branches: EligibleBranches,
    pub selection_process: SelectionProcess,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityCriteria {
    pub min_cgpa: Option<f64>,
    pub backlog_allowed: bool,
    pub other_eligibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondDetails {
    pub has_bond: bool,
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointOfContact {
    pub name: String,
    pub designation: String,
    pub mobile: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationDetails {
    pub application_deadline: Option<Date>,
    pub application_link: String,
}

// ---------------------------------------------------------------------------
// Draft (create payload)
// ---------------------------------------------------------------------------

/// Everything collected by the drive wizard before the single submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDriveDraft {
    pub placement_drive_title: String,
    pub session_id: Option<DbId>,
    pub jnf_id: Option<DbId>,
    pub company_details: CompanyDetails,
    pub job_profiles: Vec<JobProfile>,
    pub eligibility_criteria: EligibilityCriteria,
    pub bond_details: BondDetails,
    pub point_of_contact: Vec<PointOfContact>,
    pub application_details: ApplicationDetails,
}

/// Ensure every profile has an ID and no two profiles share one.
pub fn validate_profile_ids(profiles: &[JobProfile]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for (idx, profile) in profiles.iter().enumerate() {
        let id = profile.profile_id.trim();
        if id.is_empty() {
            errors.push(format!("Job profile {} is missing a profile id", idx + 1));
        } else if !seen.insert(id.to_string()) {
            errors.push(format!("Duplicate job profile id '{id}'"));
        }
    }
    CoreError::from_messages(errors)
}

/// Assign `profile-N` IDs to profiles submitted without one.
pub fn assign_missing_profile_ids(profiles: &mut [JobProfile]) {
    let mut used: HashSet<String> = profiles
        .iter()
        .map(|p| p.profile_id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let mut counter = 1;
    for profile in profiles.iter_mut() {
        if !profile.profile_id.trim().is_empty() {
            continue;
        }
        while used.contains(&format!("profile-{counter}")) {
            counter += 1;
        }
        profile.profile_id = format!("profile-{counter}");
        used.insert(profile.profile_id.clone());
    }
}

/// Filters for `GET /placement/all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DriveFilter {
    pub status: Option<DriveStatus>,
    pub session_id: Option<DbId>,
    /// Case-insensitive substring of the company name.
    pub company: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for `PUT /placement/{id}/update-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDriveStatus {
    pub status: DriveStatus,
}

/// DTO for `POST /placement/create-from-jnf/{jnf_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDriveFromJnf {
    pub placement_drive_title: Option<String>,
    pub session_id: Option<DbId>,
}
