//! Student records and debour (placement suspension) rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PersonalInfo {
    #[validate(length(min = 1, message = "Student name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub roll_number: String,
    #[validate(email(message = "Student email is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    pub batch: String,
    pub gender: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Academics {
    #[validate(range(min = 0.0, max = 10.0, message = "CGPA must be between 0 and 10"))]
    pub cgpa: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Tenth marks must be between 0 and 100"))]
    pub tenth_marks: Option<f64>,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Twelfth marks must be between 0 and 100"
    ))]
    pub twelfth_marks: Option<f64>,
    #[validate(range(min = 0, message = "Backlogs cannot be negative"))]
    pub backlogs: i32,
}

/// Payload for `POST /student/register/admin`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterStudent {
    #[validate(nested)]
    pub personal_info: PersonalInfo,
    #[validate(nested)]
    #[serde(default)]
    pub academics: Academics,
}

/// Suspension history of a student.
///
/// The original `reason` and `deboured_at` are kept after a revocation so
/// the record shows why the student was suspended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebourDetails {
    pub reason: Option<String>,
    pub deboured_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub revoked_reason: Option<String>,
}

/// Compute the details written when a student is deboured.
pub fn debour(
    is_deboured: bool,
    reason: &str,
    now: Timestamp,
) -> Result<DebourDetails, CoreError> {
    if is_deboured {
        return Err(CoreError::Conflict(
            "Student is already deboured".to_string(),
        ));
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CoreError::Validation(
            "A reason is required to debour a student".to_string(),
        ));
    }
    Ok(DebourDetails {
        reason: Some(reason.to_string()),
        deboured_at: Some(now),
        revoked_at: None,
        revoked_reason: None,
    })
}

/// Compute the details written when a debour is revoked.
pub fn revoke_debour(
    is_deboured: bool,
    current: &DebourDetails,
    reason: Option<&str>,
    now: Timestamp,
) -> Result<DebourDetails, CoreError> {
    if !is_deboured {
        return Err(CoreError::Conflict("Student is not deboured".to_string()));
    }
    Ok(DebourDetails {
        reason: current.reason.clone(),
        deboured_at: current.deboured_at,
        revoked_at: Some(now),
        revoked_reason: reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
    })
}

/// Filters for `GET /student/getallstudent`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StudentFilter {
    pub department: Option<String>,
    pub batch: Option<String>,
    pub deboured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// DTO for `POST /student/debour/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebourRequest {
    #[serde(default)]
    pub reason: String,
}

/// DTO for `POST /student/revoke-debour/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevokeDebourRequest {
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn valid_registration() -> RegisterStudent {
        RegisterStudent {
            personal_info: PersonalInfo {
                name: "Asha".into(),
                roll_number: "21CS001".into(),
                email: "asha@college.edu".into(),
                department: "CSE".into(),
                batch: "2025".into(),
                ..Default::default()
            },
            academics: Academics {
                cgpa: 8.4,
                tenth_marks: Some(92.0),
                twelfth_marks: Some(88.5),
                backlogs: 0,
            },
        }
    }

    #[test]
    fn registration_validates_nested_fields() {
        assert!(valid_registration().validate().is_ok());

        let mut input = valid_registration();
        input.personal_info.name = String::new();
        input.academics.cgpa = 12.0;
        let err: CoreError = input.validate().unwrap_err().into();
        let msg = err.to_string();
        assert!(msg.contains("Student name is required"));
        assert!(msg.contains("CGPA must be between 0 and 10"));
    }

    #[test]
    fn debour_requires_reason_and_active_student() {
        let now = Utc::now();
        let details = debour(false, " policy violation ", now).unwrap();
        assert_eq!(details.reason.as_deref(), Some("policy violation"));
        assert_eq!(details.deboured_at, Some(now));

        assert_matches!(debour(false, "  ", now), Err(CoreError::Validation(_)));
        assert_matches!(debour(true, "again", now), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn revoke_keeps_history() {
        let now = Utc::now();
        let details = debour(false, "policy violation", now).unwrap();
        let revoked = revoke_debour(true, &details, Some("appeal accepted"), now).unwrap();
        assert_eq!(revoked.reason.as_deref(), Some("policy violation"));
        assert_eq!(revoked.revoked_reason.as_deref(), Some("appeal accepted"));
        assert!(revoked.revoked_at.is_some());

        assert_matches!(
            revoke_debour(false, &revoked, None, now),
            Err(CoreError::Conflict(_))
        );
    }
}
