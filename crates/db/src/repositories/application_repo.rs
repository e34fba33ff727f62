//! Repository for the `drive_applications` table.

use placement_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::DriveApplication;
use crate::models::student::StudentSummary;

const COLUMNS: &str = "id, placement_drive_id, student_id, eligible_profiles, applied_at";

pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Record an application. A second application by the same student
    /// violates `uq_drive_applications_drive_student`.
    pub async fn create(
        pool: &PgPool,
        drive_id: DbId,
        student_id: DbId,
        eligible_profiles: &[String],
    ) -> Result<DriveApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO drive_applications (placement_drive_id, student_id, eligible_profiles) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DriveApplication>(&query)
            .bind(drive_id)
            .bind(student_id)
            .bind(eligible_profiles)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<DriveApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drive_applications \
             WHERE placement_drive_id = $1 \
             ORDER BY applied_at ASC, id ASC"
        );
        sqlx::query_as::<_, DriveApplication>(&query)
            .bind(drive_id)
            .fetch_all(pool)
            .await
    }

    /// IDs of every student who applied to the drive.
    pub async fn student_ids_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT student_id FROM drive_applications \
             WHERE placement_drive_id = $1 \
             ORDER BY student_id ASC",
        )
        .bind(drive_id)
        .fetch_all(pool)
        .await
    }

    /// Summaries of every applicant, ordered by roll number.
    pub async fn applicants(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<StudentSummary>, sqlx::Error> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT s.id, s.name, s.roll_number, s.department, s.batch, s.cgpa \
             FROM drive_applications a \
             JOIN students s ON s.id = a.student_id \
             WHERE a.placement_drive_id = $1 \
             ORDER BY s.roll_number ASC",
        )
        .bind(drive_id)
        .fetch_all(pool)
        .await
    }
}
