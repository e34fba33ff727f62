//! Handlers for student records and debour (placement suspension).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use placement_core::error::CoreError;
use placement_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use placement_core::student::{self, RegisterStudent};
use placement_core::types::DbId;
use placement_db::models::student::{
    DebourRequest, DebourStatus, RevokeDebourRequest, StudentFilter,
};
use placement_db::repositories::StudentRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::find_student;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/student/getallstudent
pub async fn list_students(
    State(state): State<AppState>,
    Query(filter): Query<StudentFilter>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(filter.offset);
    let students = StudentRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/student/profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = find_student(&state.pool, student_id).await?;
    Ok(Json(DataResponse { data: student }))
}

/// POST /api/v1/student/register/admin
pub async fn register_by_admin(
    State(state): State<AppState>,
    Json(input): Json<RegisterStudent>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let student = StudentRepo::register(&state.pool, &input).await?;

    tracing::info!(
        student_id = student.id,
        roll_number = %student.personal_info.roll_number,
        "Student registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

// ---------------------------------------------------------------------------
// Debour
// ---------------------------------------------------------------------------

/// POST /api/v1/student/debour/{id}
///
/// Suspends a student from placements. Deboured students cannot apply to
/// drives until the debour is revoked.
pub async fn debour_student(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    Json(input): Json<DebourRequest>,
) -> AppResult<impl IntoResponse> {
    let current = find_student(&state.pool, student_id).await?;
    let details = student::debour(current.is_deboured, &input.reason, Utc::now())?;

    let updated = StudentRepo::debour(&state.pool, student_id, &details)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Student is already deboured".to_string()))
        })?;

    tracing::info!(student_id, "Student deboured");

    Ok(Json(DataResponse {
        data: DebourStatus::from(&updated),
    }))
}

/// POST /api/v1/student/revoke-debour/{id}
pub async fn revoke_debour(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
    body: Option<Json<RevokeDebourRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let current = find_student(&state.pool, student_id).await?;
    let details = student::revoke_debour(
        current.is_deboured,
        &current.debour_details,
        input.reason.as_deref(),
        Utc::now(),
    )?;

    let updated = StudentRepo::revoke_debour(&state.pool, student_id, &details)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Student is not deboured".to_string())))?;

    tracing::info!(student_id, "Student debour revoked");

    Ok(Json(DataResponse {
        data: DebourStatus::from(&updated),
    }))
}

/// GET /api/v1/student/debour-status/{id}
pub async fn debour_status(
    State(state): State<AppState>,
    Path(student_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let student = find_student(&state.pool, student_id).await?;
    Ok(Json(DataResponse {
        data: DebourStatus::from(&student),
    }))
}
