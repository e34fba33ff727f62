//! Student entity model and DTOs.
//!
//! The `students` table is flat; the API shape groups columns into
//! personal, academic and debour sections, so [`Student`] implements
//! `FromRow` by hand.

use placement_core::student::{Academics, DebourDetails, PersonalInfo};
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

pub use placement_core::student::{DebourRequest, RevokeDebourRequest, StudentFilter};

/// A student record.
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

impl<'r> FromRow<'r, PgRow> for Student {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            personal_info: PersonalInfo {
                name: row.try_get("name")?,
                roll_number: row.try_get("roll_number")?,
                email: row.try_get("email")?,
                department: row.try_get("department")?,
                batch: row.try_get("batch")?,
                gender: row.try_get("gender")?,
                category: row.try_get("category")?,
            },
            academics: Academics {
                cgpa: row.try_get("cgpa")?,
                tenth_marks: row.try_get("tenth_marks")?,
                twelfth_marks: row.try_get("twelfth_marks")?,
                backlogs: row.try_get("backlogs")?,
            },
            is_deboured: row.try_get("is_deboured")?,
            debour_details: DebourDetails {
                reason: row.try_get("debour_reason")?,
                deboured_at: row.try_get("deboured_at")?,
                revoked_at: row.try_get("debour_revoked_at")?,
                revoked_reason: row.try_get("debour_revoked_reason")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// The columns of a student shown in cohort and result listings.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct StudentSummary {
    pub id: DbId,
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub batch: String,
    pub cgpa: f64,
}

/// Response for `GET /student/debour-status/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebourStatus {
    pub student_id: DbId,
    pub is_deboured: bool,
    pub debour_details: DebourDetails,
}

impl From<&Student> for DebourStatus {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.id,
            is_deboured: student.is_deboured,
            debour_details: student.debour_details.clone(),
        }
    }
}
