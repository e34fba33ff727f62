//! Handlers for Job Notification Forms.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placement_core::drive::assign_missing_profile_ids;
use placement_core::error::CoreError;
use placement_core::jnf::{JnfDraft, JnfStatus};
use placement_core::types::DbId;
use placement_core::wizard::{validate_jnf, validate_jnf_step, JnfWizardStep};
use placement_db::models::jnf::{Jnf, ReviewJnf};
use placement_db::repositories::JnfRepo;
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::query::JnfListParams;
use crate::response::{DataResponse, StepValidation};
use crate::state::AppState;

/// Body of `POST /jnf/validate-step`.
#[derive(Debug, Deserialize)]
pub struct JnfStepRequest {
    pub step: u8,
    #[serde(default)]
    pub jnf: JnfDraft,
}

async fn find_jnf(pool: &PgPool, jnf_id: DbId) -> AppResult<Jnf> {
    JnfRepo::find_by_id(pool, jnf_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Jnf",
            id: jnf_id,
        }))
}

/// POST /api/v1/jnf/submit
pub async fn submit_jnf(
    State(state): State<AppState>,
    Json(mut draft): Json<JnfDraft>,
) -> AppResult<impl IntoResponse> {
    assign_missing_profile_ids(&mut draft.job_profiles);
    validate_jnf(&draft)?;

    let jnf = JnfRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        jnf_id = jnf.id,
        company = %jnf.company_details.name,
        "JNF submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: jnf })))
}

/// POST /api/v1/jnf/validate-step
pub async fn validate_step(Json(input): Json<JnfStepRequest>) -> AppResult<impl IntoResponse> {
    let step = JnfWizardStep::from_index(input.step)?;
    let errors = validate_jnf_step(step, &input.jnf);

    Ok(Json(DataResponse {
        data: StepValidation {
            step: input.step,
            label: step.label(),
            valid: errors.is_empty(),
            errors,
        },
    }))
}

/// GET /api/v1/jnf/all
pub async fn list_jnfs(
    State(state): State<AppState>,
    Query(params): Query<JnfListParams>,
) -> AppResult<impl IntoResponse> {
    let jnfs = JnfRepo::list(&state.pool, params.status).await?;
    Ok(Json(DataResponse { data: jnfs }))
}

/// GET /api/v1/jnf/{id}
pub async fn get_jnf(
    State(state): State<AppState>,
    Path(jnf_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let jnf = find_jnf(&state.pool, jnf_id).await?;
    Ok(Json(DataResponse { data: jnf }))
}

/// PUT /api/v1/jnf/{id}/status
///
/// Approves or rejects a submitted JNF. Reviews are final.
pub async fn review_jnf(
    State(state): State<AppState>,
    Path(jnf_id): Path<DbId>,
    Json(input): Json<ReviewJnf>,
) -> AppResult<impl IntoResponse> {
    let jnf = find_jnf(&state.pool, jnf_id).await?;
    let current: JnfStatus = jnf.jnf_status()?;
    let next = current.review(input.status)?;

    let updated = JnfRepo::update_status(&state.pool, jnf_id, current, next)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "JNF {jnf_id} was reviewed concurrently"
            )))
        })?;

    tracing::info!(jnf_id, status = next.as_str(), "JNF reviewed");

    Ok(Json(DataResponse { data: updated }))
}
