//! Handlers for placement drives: creation (wizard and JNF cascade),
//! step validation, listing and status changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placement_core::drive::{assign_missing_profile_ids, PlacementDriveDraft};
use placement_core::error::CoreError;
use placement_core::jnf::{drive_draft_from_jnf, JnfStatus};
use placement_core::listing::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use placement_core::notification::OutboxEventType;
use placement_core::types::DbId;
use placement_core::wizard::{validate_drive_draft, validate_drive_step, DriveWizardStep};
use placement_db::models::drive::{CreateDriveFromJnf, DriveFilter, UpdateDriveStatus};
use placement_db::repositories::{DriveRepo, JnfRepo, SessionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::find_drive;
use crate::response::{DataResponse, StepValidation};
use crate::state::AppState;

/// Body of `POST /placement/validate-step`.
#[derive(Debug, Deserialize)]
pub struct DriveStepRequest {
    pub step: u8,
    #[serde(default)]
    pub draft: PlacementDriveDraft,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/placement/create-placement-drive
///
/// Validates every wizard step, then stores the drive with status
/// `in_progress` and queues its `drive.created` notification.
pub async fn create_drive(
    State(state): State<AppState>,
    Json(mut draft): Json<PlacementDriveDraft>,
) -> AppResult<impl IntoResponse> {
    assign_missing_profile_ids(&mut draft.job_profiles);
    validate_drive_draft(&draft)?;
    ensure_references(&state, &draft).await?;

    let drive = DriveRepo::create(&state.pool, &draft).await?;
    state.notify_outbox(drive.id, OutboxEventType::DriveCreated.as_str());

    tracing::info!(
        drive_id = drive.id,
        title = %drive.placement_drive_title,
        company = %drive.company_details.name,
        "Placement drive created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: drive })))
}

/// POST /api/v1/placement/create-from-jnf/{jnf_id}
///
/// Builds the drive from an approved JNF. The title defaults to
/// "<company> Placement Drive".
pub async fn create_drive_from_jnf(
    State(state): State<AppState>,
    Path(jnf_id): Path<DbId>,
    Json(input): Json<CreateDriveFromJnf>,
) -> AppResult<impl IntoResponse> {
    let jnf = JnfRepo::find_by_id(&state.pool, jnf_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Jnf",
            id: jnf_id,
        }))?;

    let status = jnf.jnf_status()?;
    if status != JnfStatus::Approved {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Only approved JNFs can become drives (JNF {jnf_id} is {})",
            status.as_str()
        ))));
    }

    let draft = drive_draft_from_jnf(
        jnf.id,
        &jnf.draft(),
        input.placement_drive_title,
        input.session_id,
    );
    validate_drive_draft(&draft)?;
    ensure_references(&state, &draft).await?;

    let drive = DriveRepo::create(&state.pool, &draft).await?;
    state.notify_outbox(drive.id, OutboxEventType::DriveCreated.as_str());

    tracing::info!(drive_id = drive.id, jnf_id, "Placement drive created from JNF");

    Ok((StatusCode::CREATED, Json(DataResponse { data: drive })))
}

/// Reject drafts pointing at sessions or JNFs that do not exist.
async fn ensure_references(state: &AppState, draft: &PlacementDriveDraft) -> AppResult<()> {
    if let Some(session_id) = draft.session_id {
        if SessionRepo::find_by_id(&state.pool, session_id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "PlacementSession",
                id: session_id,
            }));
        }
    }
    if let Some(jnf_id) = draft.jnf_id {
        if JnfRepo::find_by_id(&state.pool, jnf_id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Jnf",
                id: jnf_id,
            }));
        }
    }
    Ok(())
}

/// POST /api/v1/placement/validate-step
///
/// Runs the validation of a single wizard step. Always 200; `valid` tells
/// whether the wizard may advance.
pub async fn validate_step(
    Json(input): Json<DriveStepRequest>,
) -> AppResult<impl IntoResponse> {
    let step = DriveWizardStep::from_index(input.step)?;
    let errors = validate_drive_step(step, &input.draft);

    Ok(Json(DataResponse {
        data: StepValidation {
            step: input.step,
            label: step.label(),
            valid: errors.is_empty(),
            errors,
        },
    }))
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/placement/all
pub async fn list_drives(
    State(state): State<AppState>,
    Query(filter): Query<DriveFilter>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(filter.offset);
    let drives = DriveRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse { data: drives }))
}

/// GET /api/v1/placement/{id}/getone
pub async fn get_drive(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let drive = find_drive(&state.pool, drive_id).await?;
    Ok(Json(DataResponse { data: drive }))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// PUT /api/v1/placement/{id}/update-status
///
/// Drives move freely between `in_progress`, `hold` and `closed`; only
/// `in_progress` accepts applications.
pub async fn update_drive_status(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
    Json(input): Json<UpdateDriveStatus>,
) -> AppResult<impl IntoResponse> {
    let drive = DriveRepo::update_status(&state.pool, drive_id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlacementDrive",
            id: drive_id,
        }))?;

    tracing::info!(
        drive_id,
        status = input.status.as_str(),
        "Placement drive status updated"
    );

    Ok(Json(DataResponse { data: drive }))
}
