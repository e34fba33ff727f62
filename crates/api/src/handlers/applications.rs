//! Handlers for student applications to a drive.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use placement_core::eligibility::{check_eligibility, Applicant, DriveRules};
use placement_core::types::DbId;
use placement_db::repositories::ApplicationRepo;

use crate::error::AppResult;
use crate::handlers::{find_drive, find_student};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/placement/{id}/apply/{student_id}
///
/// Records an application after checking the drive's status, deadline and
/// eligibility rules. The application lists the job profiles the student
/// qualifies for.
pub async fn apply(
    State(state): State<AppState>,
    Path((drive_id, student_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let drive = find_drive(&state.pool, drive_id).await?;
    let student = find_student(&state.pool, student_id).await?;

    let applicant = Applicant {
        department: &student.personal_info.department,
        cgpa: student.academics.cgpa,
        backlogs: student.academics.backlogs,
        is_deboured: student.is_deboured,
    };
    let rules = DriveRules {
        status: drive.drive_status()?,
        application_deadline: drive.application_details.application_deadline,
        criteria: &drive.eligibility_criteria.0,
        job_profiles: &drive.job_profiles.0,
    };
    let profiles = check_eligibility(&applicant, &rules, Utc::now().date_naive())?;

    let application = ApplicationRepo::create(&state.pool, drive_id, student_id, &profiles).await?;

    tracing::info!(
        drive_id,
        student_id,
        profiles = profiles.len(),
        "Student applied to drive"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// GET /api/v1/placement/{id}/applications
pub async fn list_applications(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_drive(&state.pool, drive_id).await?;
    let applications = ApplicationRepo::list_for_drive(&state.pool, drive_id).await?;
    Ok(Json(DataResponse { data: applications }))
}
