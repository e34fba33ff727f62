//! Application eligibility for a placement drive.

use crate::drive::{DriveStatus, EligibilityCriteria, JobProfile};
use crate::error::CoreError;
use crate::types::Date;

/// The parts of a student record that decide eligibility.
#[derive(Debug, Clone)]
pub struct Applicant<'a> {
    pub department: &'a str,
    pub cgpa: f64,
    pub backlogs: i32,
    pub is_deboured: bool,
}

/// The parts of a drive that decide eligibility.
#[derive(Debug, Clone)]
pub struct DriveRules<'a> {
    pub status: DriveStatus,
    pub application_deadline: Option<Date>,
    pub criteria: &'a EligibilityCriteria,
    pub job_profiles: &'a [JobProfile],
}

/// Check whether a student may apply to a drive on `today`.
///
/// Returns the IDs of the job profiles the student is eligible for.
pub fn check_eligibility(
    applicant: &Applicant<'_>,
    drive: &DriveRules<'_>,
    today: Date,
) -> Result<Vec<String>, CoreError> {
    if !drive.status.accepts_applications() {
        return Err(CoreError::Conflict(format!(
            "Drive is not accepting applications (status '{}')",
            drive.status.as_str()
        )));
    }
    if let Some(deadline) = drive.application_deadline {
        if today > deadline {
            return Err(CoreError::Conflict(format!(
                "Application deadline {deadline} has passed"
            )));
        }
    }
    if applicant.is_deboured {
        return Err(CoreError::Forbidden(
            "Student is deboured from placements".to_string(),
        ));
    }
    if let Some(min) = drive.criteria.min_cgpa {
        if applicant.cgpa < min {
            return Err(CoreError::Validation(format!(
                "CGPA {:.2} is below the required minimum of {min:.2}",
                applicant.cgpa
            )));
        }
    }
    if !drive.criteria.backlog_allowed && applicant.backlogs > 0 {
        return Err(CoreError::Validation(
            "Students with active backlogs are not eligible for this drive".to_string(),
        ));
    }

    let profiles: Vec<String> = drive
        .job_profiles
        .iter()
        .filter(|p| p.eligible_branches.is_department_eligible(applicant.department))
        .map(|p| p.profile_id.clone())
        .collect();
    if profiles.is_empty() {
        return Err(CoreError::Validation(format!(
            "Department '{}' is not eligible for any job profile of this drive",
            applicant.department
        )));
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::{BranchEntry, EligibleBranches};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn profile(id: &str, branch: &str) -> JobProfile {
        JobProfile {
            profile_id: id.into(),
            eligible_branches: EligibleBranches {
                btech: vec![BranchEntry {
                    name: branch.into(),
                    specialization: None,
                    eligible: true,
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn day(d: u32) -> Date {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn student(cgpa: f64, backlogs: i32) -> Applicant<'static> {
        Applicant {
            department: "CSE",
            cgpa,
            backlogs,
            is_deboured: false,
        }
    }

    #[test]
    fn eligible_student_gets_matching_profiles() {
        let criteria = EligibilityCriteria {
            min_cgpa: Some(7.0),
            ..Default::default()
        };
        let profiles = vec![profile("sde", "CSE"), profile("core", "ECE")];
        let rules = DriveRules {
            status: DriveStatus::InProgress,
            application_deadline: Some(day(10)),
            criteria: &criteria,
            job_profiles: &profiles,
        };
        let ok = check_eligibility(&student(8.0, 0), &rules, day(10)).unwrap();
        assert_eq!(ok, vec!["sde".to_string()]);
    }

    #[test]
    fn each_rule_rejects() {
        let criteria = EligibilityCriteria {
            min_cgpa: Some(7.0),
            backlog_allowed: false,
            ..Default::default()
        };
        let profiles = vec![profile("core", "ECE")];
        let mut rules = DriveRules {
            status: DriveStatus::InProgress,
            application_deadline: Some(day(10)),
            criteria: &criteria,
            job_profiles: &profiles,
        };

        assert_matches!(
            check_eligibility(&student(8.0, 0), &rules, day(11)),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            check_eligibility(&student(6.5, 0), &rules, day(1)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            check_eligibility(&student(8.0, 2), &rules, day(1)),
            Err(CoreError::Validation(_))
        );
        // Department CSE is not eligible for the ECE-only profile.
        assert_matches!(
            check_eligibility(&student(8.0, 0), &rules, day(1)),
            Err(CoreError::Validation(_))
        );

        let deboured = Applicant {
            is_deboured: true,
            ..student(9.0, 0)
        };
        assert_matches!(
            check_eligibility(&deboured, &rules, day(1)),
            Err(CoreError::Forbidden(_))
        );

        rules.status = DriveStatus::Closed;
        assert_matches!(
            check_eligibility(&student(8.0, 0), &rules, day(1)),
            Err(CoreError::Conflict(_))
        );
    }
}
