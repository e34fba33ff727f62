//! Handlers for placement rounds.
//!
//! Every write is version-checked: the handler compares the caller's
//! version with the stored one first (409 with a reload hint), and the
//! repository repeats the check atomically in its `WHERE` clause so a
//! write racing between the two still ends in 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placement_core::error::CoreError;
use placement_core::notification::OutboxEventType;
use placement_core::round::{check_version, validate_round_fields, RoundStatus, Transition};
use placement_core::selection::{
    normalize_ids, not_selected, union_appeared, validate_appeared, validate_selection,
};
use placement_core::types::DbId;
use placement_db::models::outbox::NewOutboxEvent;
use placement_db::models::round::{
    CreateRound, DeclareResults, DetailedResults, PlacementRound, RoundDetails,
    RoundTransitionRequest, UpdateCohort, UpdateRound,
};
use placement_db::models::student::StudentSummary;
use placement_db::repositories::{ApplicationRepo, RoundRepo, StudentRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::find_drive;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a round of a drive or fail with 404.
async fn find_round(pool: &PgPool, drive_id: DbId, round_id: DbId) -> AppResult<PlacementRound> {
    RoundRepo::find(pool, drive_id, round_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlacementRound",
            id: round_id,
        }))
}

/// A `None` from a version-guarded write means another write won the race.
fn concurrent_write(round_id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Round {round_id} was modified concurrently. Reload the round and try again."
    )))
}

/// Students who may sit a round: the drive's applicants for the first
/// round, the previous round's selection afterwards.
async fn eligible_for_round(
    pool: &PgPool,
    drive_id: DbId,
    round: &PlacementRound,
) -> AppResult<Vec<DbId>> {
    if round.round_number <= 1 {
        return Ok(ApplicationRepo::student_ids_for_drive(pool, drive_id).await?);
    }
    let previous = RoundRepo::find_by_number(pool, drive_id, round.round_number - 1).await?;
    Ok(previous
        .map(|r| normalize_ids(&r.selected_students))
        .unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/placement/{id}/rounds/all
///
/// All rounds in order, plus the union of students who appeared in any of
/// them.
pub async fn get_round_details(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_drive(&state.pool, drive_id).await?;
    let rounds = RoundRepo::list_for_drive(&state.pool, drive_id).await?;
    let appeared_students =
        union_appeared(rounds.iter().map(|r| r.appeared_students.as_slice()));

    Ok(Json(DataResponse {
        data: RoundDetails {
            rounds,
            appeared_students,
        },
    }))
}

/// GET /api/v1/placement/{id}/rounds/{round_id}/applicant-students
pub async fn applicant_students(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let students: Vec<StudentSummary> = if round.round_number <= 1 {
        ApplicationRepo::applicants(&state.pool, drive_id).await?
    } else {
        let ids = eligible_for_round(&state.pool, drive_id, &round).await?;
        StudentRepo::find_summaries(&state.pool, &ids).await?
    };
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/placement/{id}/rounds/{round_id}/appeared-students
pub async fn appeared_students(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let students = StudentRepo::find_summaries(&state.pool, &round.appeared_students).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/placement/{id}/rounds/{round_id}/selected-students
pub async fn selected_students(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let students = StudentRepo::find_summaries(&state.pool, &round.selected_students).await?;
    Ok(Json(DataResponse { data: students }))
}

/// GET /api/v1/placement/{id}/rounds/{round_id}/detailed-results
pub async fn detailed_results(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let appeared = StudentRepo::find_summaries(&state.pool, &round.appeared_students).await?;

    let rejected = not_selected(&round.appeared_students, &round.selected_students);
    let (not_selected, selected): (Vec<_>, Vec<_>) = appeared
        .iter()
        .cloned()
        .partition(|s| rejected.contains(&s.id));

    Ok(Json(DataResponse {
        data: DetailedResults {
            appeared_count: appeared.len(),
            selected_count: selected.len(),
            round,
            appeared,
            selected,
            not_selected,
        },
    }))
}

// ---------------------------------------------------------------------------
// Create / update
// ---------------------------------------------------------------------------

/// POST /api/v1/placement/{id}/add-round
///
/// Appends a round with the next round number and status `upcoming`.
pub async fn add_round(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
    Json(input): Json<CreateRound>,
) -> AppResult<impl IntoResponse> {
    validate_round_fields(
        &input.round_name,
        input.round_duration_hours,
        input.round_duration_minutes,
        input.start_time,
        input.end_time,
    )?;

    let round = RoundRepo::create(&state.pool, drive_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlacementDrive",
            id: drive_id,
        }))?;

    tracing::info!(
        drive_id,
        round_id = round.id,
        round_number = round.round_number,
        "Round added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: round })))
}

/// PUT /api/v1/placement/{id}/rounds/{round_id}/update-round
///
/// Full update of the round. A status change in the body must be a legal
/// transition and queues the matching notification.
pub async fn update_round(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateRound>,
) -> AppResult<impl IntoResponse> {
    let drive = find_drive(&state.pool, drive_id).await?;
    let round = find_round(&state.pool, drive_id, round_id).await?;
    check_version(round.id, round.version, input.version)?;

    validate_round_fields(
        &input.round_name,
        input.round_duration_hours,
        input.round_duration_minutes,
        input.start_time,
        input.end_time,
    )?;

    let current = round.status()?;
    let target = input.round_status.unwrap_or(current);
    let event = match current.transition_to(target)? {
        Transition::Unchanged => None,
        Transition::Advance(status) => Some(
            NewOutboxEvent::for_drive(&drive, transition_event(status))
                .with_round(&round)
                .with_field("round_name", input.round_name.trim())
                .with_field("venue", input.venue.trim()),
        ),
    };

    let updated = RoundRepo::update(&state.pool, round.id, &input, target, event.as_ref())
        .await?
        .ok_or_else(|| concurrent_write(round.id))?;

    if let Some(event) = &event {
        state.notify_outbox(drive_id, event.event_type.as_str());
    }

    tracing::info!(
        drive_id,
        round_id,
        version = updated.version,
        status = %updated.round_status,
        "Round updated"
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/placement/{id}/rounds/{round_id}/start
pub async fn start_round(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    body: Option<Json<RoundTransitionRequest>>,
) -> AppResult<impl IntoResponse> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let round = advance_round(&state, drive_id, round_id, RoundStatus::Ongoing, request).await?;
    Ok(Json(DataResponse { data: round }))
}

/// POST /api/v1/placement/{id}/rounds/{round_id}/complete
pub async fn complete_round(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    body: Option<Json<RoundTransitionRequest>>,
) -> AppResult<impl IntoResponse> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let round = advance_round(&state, drive_id, round_id, RoundStatus::Completed, request).await?;
    Ok(Json(DataResponse { data: round }))
}

fn transition_event(status: RoundStatus) -> OutboxEventType {
    match status {
        RoundStatus::Completed => OutboxEventType::RoundCompleted,
        _ => OutboxEventType::RoundStarted,
    }
}

/// Move a round one step forward. Repeating a transition is a conflict,
/// so of two concurrent "start" requests exactly one succeeds.
async fn advance_round(
    state: &AppState,
    drive_id: DbId,
    round_id: DbId,
    target: RoundStatus,
    request: RoundTransitionRequest,
) -> AppResult<PlacementRound> {
    let drive = find_drive(&state.pool, drive_id).await?;
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let expected = request.version.unwrap_or(round.version);
    check_version(round.id, round.version, expected)?;

    let current = round.status()?;
    if current == target {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Round {round_id} is already {}",
            target.as_str()
        ))));
    }
    current.transition_to(target)?;

    let event_type = transition_event(target);
    let event = NewOutboxEvent::for_drive(&drive, event_type).with_round(&round);
    let updated = RoundRepo::set_status(&state.pool, round.id, expected, target, Some(&event))
        .await?
        .ok_or_else(|| concurrent_write(round.id))?;

    state.notify_outbox(drive_id, event_type.as_str());

    tracing::info!(
        drive_id,
        round_id,
        from = current.as_str(),
        to = target.as_str(),
        "Round status changed"
    );

    Ok(updated)
}

// ---------------------------------------------------------------------------
// Cohorts
// ---------------------------------------------------------------------------

/// PUT /api/v1/placement/{id}/rounds/{round_id}/update-appeared-students
///
/// Replaces the appeared cohort. Students must be eligible for the round,
/// and the current selection must remain a subset of the new cohort.
pub async fn update_appeared_students(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCohort>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let expected = input.version.unwrap_or(round.version);
    check_version(round.id, round.version, expected)?;
    ensure_open(&round)?;

    let appeared = normalize_ids(&input.student_ids);
    let eligible = eligible_for_round(&state.pool, drive_id, &round).await?;
    validate_appeared(&appeared, &eligible)?;
    validate_selection(&round.selected_students, &appeared).map_err(|_| {
        CoreError::Validation(
            "Selected students must remain in the appeared cohort. Deselect them first."
                .to_string(),
        )
    })?;

    let updated = RoundRepo::set_appeared(&state.pool, round.id, expected, &appeared)
        .await?
        .ok_or_else(|| concurrent_write(round.id))?;

    tracing::info!(drive_id, round_id, appeared = appeared.len(), "Appeared students updated");

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/placement/{id}/rounds/{round_id}/update-selected-students
///
/// Replaces the selected cohort. Every selected student must have appeared.
pub async fn update_selected_students(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCohort>,
) -> AppResult<impl IntoResponse> {
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let expected = input.version.unwrap_or(round.version);
    check_version(round.id, round.version, expected)?;
    ensure_open(&round)?;

    let selected = normalize_ids(&input.student_ids);
    validate_selection(&selected, &round.appeared_students)?;

    let updated = RoundRepo::set_selected(&state.pool, round.id, expected, &selected)
        .await?
        .ok_or_else(|| concurrent_write(round.id))?;

    tracing::info!(drive_id, round_id, selected = selected.len(), "Selected students updated");

    Ok(Json(DataResponse { data: updated }))
}

fn ensure_open(round: &PlacementRound) -> AppResult<()> {
    if !round.status()?.accepts_selection_changes() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Round {} is completed; its cohorts can no longer change",
            round.id
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// PUT /api/v1/placement/{id}/rounds/{round_id}/declare-results
///
/// Stores the result message and queues the result notification.
/// Declaring again overwrites the message and queues a new notification.
pub async fn declare_results(
    State(state): State<AppState>,
    Path((drive_id, round_id)): Path<(DbId, DbId)>,
    Json(input): Json<DeclareResults>,
) -> AppResult<impl IntoResponse> {
    let drive = find_drive(&state.pool, drive_id).await?;
    let round = find_round(&state.pool, drive_id, round_id).await?;
    let expected = input.version.unwrap_or(round.version);
    check_version(round.id, round.version, expected)?;

    let status = round.status()?;
    if !status.accepts_results() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Results cannot be declared while the round is {}",
            status.as_str()
        ))));
    }

    let message = input.result_message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Result message is required".to_string(),
        )));
    }
    let description = input.result_description.trim();

    let event = NewOutboxEvent::for_drive(&drive, OutboxEventType::ResultsDeclared)
        .with_round(&round)
        .with_field("result_message", message)
        .with_field("result_description", description)
        .with_field("selected_count", round.selected_students.len());

    let updated =
        RoundRepo::declare_results(&state.pool, round.id, expected, message, description, &event)
            .await?
            .ok_or_else(|| concurrent_write(round.id))?;

    state.notify_outbox(drive_id, OutboxEventType::ResultsDeclared.as_str());

    tracing::info!(
        drive_id,
        round_id,
        selected = updated.selected_students.len(),
        "Round results declared"
    );

    Ok(Json(DataResponse { data: updated }))
}
