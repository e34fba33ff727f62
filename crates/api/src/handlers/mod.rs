pub mod applications;
pub mod jnf;
pub mod notifications;
pub mod offers;
pub mod placement;
pub mod rounds;
pub mod sessions;
pub mod students;

use placement_core::error::CoreError;
use placement_core::types::DbId;
use placement_db::models::drive::PlacementDrive;
use placement_db::models::student::Student;
use placement_db::repositories::{DriveRepo, StudentRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Fetch a drive or fail with 404.
pub(crate) async fn find_drive(pool: &PgPool, drive_id: DbId) -> AppResult<PlacementDrive> {
    DriveRepo::find_by_id(pool, drive_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlacementDrive",
            id: drive_id,
        }))
}

/// Fetch a student or fail with 404.
pub(crate) async fn find_student(pool: &PgPool, student_id: DbId) -> AppResult<Student> {
    StudentRepo::find_by_id(pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))
}
