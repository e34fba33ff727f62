//! Handlers for placement sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placement_core::error::CoreError;
use placement_core::session::validate_session;
use placement_core::types::DbId;
use placement_db::models::session::CreateSession;
use placement_db::repositories::SessionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/placement-session/create
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<CreateSession>,
) -> AppResult<impl IntoResponse> {
    validate_session(&input.name, input.start_date, input.end_date)?;
    let session = SessionRepo::create(&state.pool, &input).await?;

    tracing::info!(session_id = session.id, name = %session.name, "Placement session created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/placement-session/all
pub async fn list_sessions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sessions = SessionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/placement-session/active
///
/// `data` is `null` when no session is active.
pub async fn active_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = SessionRepo::find_active(&state.pool).await?;
    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/placement-session/{id}/activate
///
/// Makes this the only active session.
pub async fn activate_session(
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = SessionRepo::activate(&state.pool, session_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlacementSession",
            id: session_id,
        }))?;

    tracing::info!(session_id, "Placement session activated");

    Ok(Json(DataResponse { data: session }))
}
