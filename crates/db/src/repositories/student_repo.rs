//! Repository for the `students` table.

use placement_core::student::{DebourDetails, RegisterStudent};
use placement_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{Student, StudentFilter, StudentSummary};

const COLUMNS: &str = "\
    id, name, roll_number, email, department, batch, gender, category, \
    cgpa, tenth_marks, twelfth_marks, backlogs, \
    is_deboured, debour_reason, deboured_at, debour_revoked_at, debour_revoked_reason, \
    created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, name, roll_number, department, batch, cgpa";

pub struct StudentRepo;

impl StudentRepo {
    /// Insert a student registered by an admin.
    pub async fn register(pool: &PgPool, input: &RegisterStudent) -> Result<Student, sqlx::Error> {
        let info = &input.personal_info;
        let academics = &input.academics;
        let query = format!(
            "INSERT INTO students (name, roll_number, email, department, batch, gender, \
                 category, cgpa, tenth_marks, twelfth_marks, backlogs) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(info.name.trim())
            .bind(info.roll_number.trim())
            .bind(info.email.trim())
            .bind(info.department.trim())
            .bind(info.batch.trim())
            .bind(info.gender.trim())
            .bind(info.category.trim())
            .bind(academics.cgpa)
            .bind(academics.tenth_marks)
            .bind(academics.twelfth_marks)
            .bind(academics.backlogs)
            .fetch_one(pool)
            .await
    }

    /// List students ordered by roll number.
    pub async fn list(
        pool: &PgPool,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students \
             WHERE ($1::TEXT IS NULL OR department = $1) \
               AND ($2::TEXT IS NULL OR batch = $2) \
               AND ($3::BOOLEAN IS NULL OR is_deboured = $3) \
             ORDER BY roll_number ASC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(filter.department.as_deref())
            .bind(filter.batch.as_deref())
            .bind(filter.deboured)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Summaries for a set of IDs, ordered by roll number. Unknown IDs are
    /// skipped.
    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<StudentSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM students WHERE id = ANY($1) ORDER BY roll_number ASC"
        );
        sqlx::query_as::<_, StudentSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Mark a student deboured. Returns `None` if the student was already
    /// deboured when the update ran.
    pub async fn debour(
        pool: &PgPool,
        id: DbId,
        details: &DebourDetails,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students \
             SET is_deboured = true, debour_reason = $2, deboured_at = $3, \
                 debour_revoked_at = NULL, debour_revoked_reason = NULL \
             WHERE id = $1 AND NOT is_deboured \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(details.reason.as_deref())
            .bind(details.deboured_at)
            .fetch_optional(pool)
            .await
    }

    /// Lift a debour, keeping the original reason on record. Returns `None`
    /// if the student was not deboured when the update ran.
    pub async fn revoke_debour(
        pool: &PgPool,
        id: DbId,
        details: &DebourDetails,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students \
             SET is_deboured = false, debour_revoked_at = $2, debour_revoked_reason = $3 \
             WHERE id = $1 AND is_deboured \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(details.revoked_at)
            .bind(details.revoked_reason.as_deref())
            .fetch_optional(pool)
            .await
    }
}
