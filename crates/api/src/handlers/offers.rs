//! Handlers for offer letters.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use placement_core::error::CoreError;
use placement_core::notification::OutboxEventType;
use placement_core::offer::{respond, OfferResponse, OfferStatus};
use placement_core::types::DbId;
use placement_db::models::offer::{CreateOfferLetter, RespondToOffer};
use placement_db::models::outbox::NewOutboxEvent;
use placement_db::repositories::{OfferRepo, RoundRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{find_drive, find_student};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/placement/{id}/offer-letters
pub async fn list_offers(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_drive(&state.pool, drive_id).await?;
    let offers = OfferRepo::list_for_drive(&state.pool, drive_id).await?;
    Ok(Json(DataResponse { data: offers }))
}

/// POST /api/v1/placement/{id}/offer-letters
///
/// Offers go only to students selected in the drive's last completed
/// round.
pub async fn create_offer(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
    Json(input): Json<CreateOfferLetter>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let drive = find_drive(&state.pool, drive_id).await?;
    let student = find_student(&state.pool, input.student_id).await?;

    let today = Utc::now().date_naive();
    if input.expiry_date.is_some_and(|d| d < today) {
        return Err(AppError::Core(CoreError::Validation(
            "Offer expiry date cannot be in the past".to_string(),
        )));
    }

    let final_round = RoundRepo::last_completed(&state.pool, drive_id).await?;
    let selected = final_round
        .as_ref()
        .is_some_and(|r| r.selected_students.contains(&student.id));
    if !selected {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Student {} was not selected in the last completed round of this drive",
            student.id
        ))));
    }

    let mut event = NewOutboxEvent::for_drive(&drive, OutboxEventType::OfferSent)
        .with_field("student_id", student.id)
        .with_field("student_name", student.personal_info.name.as_str());
    if let Some(expiry) = input.expiry_date {
        event = event.with_field("expiry_date", expiry.to_string());
    }

    let offer = OfferRepo::create(&state.pool, drive_id, &input, &event).await?;
    state.notify_outbox(drive_id, OutboxEventType::OfferSent.as_str());

    tracing::info!(
        drive_id,
        offer_id = offer.id,
        student_id = student.id,
        "Offer letter issued"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: offer })))
}

/// PUT /api/v1/placement/{id}/offer-letters/{offer_id}/respond
///
/// Accepts or rejects a pending offer. A response after the expiry date
/// marks the offer expired and fails with 409.
pub async fn respond_to_offer(
    State(state): State<AppState>,
    Path((drive_id, offer_id)): Path<(DbId, DbId)>,
    Json(input): Json<RespondToOffer>,
) -> AppResult<impl IntoResponse> {
    let offer = OfferRepo::find(&state.pool, drive_id, offer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OfferLetter",
            id: offer_id,
        }))?;

    let today = Utc::now().date_naive();
    let outcome = respond(offer.offer_status()?, offer.expiry_date, input.accept, today)?;

    match outcome {
        OfferResponse::Recorded(status) => {
            let updated = OfferRepo::set_status(&state.pool, offer.id, status)
                .await?
                .ok_or_else(|| already_answered(offer.id))?;
            tracing::info!(
                drive_id,
                offer_id,
                status = status.as_str(),
                "Offer response recorded"
            );
            Ok(Json(DataResponse { data: updated }))
        }
        OfferResponse::Lapsed => {
            OfferRepo::set_status(&state.pool, offer.id, OfferStatus::Expired).await?;
            tracing::info!(drive_id, offer_id, "Offer expired before response");
            Err(AppError::Core(CoreError::Conflict(format!(
                "Offer {offer_id} expired on {}",
                offer
                    .expiry_date
                    .map(|d| d.to_string())
                    .unwrap_or_default()
            ))))
        }
    }
}

fn already_answered(offer_id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Offer {offer_id} has already been answered"
    )))
}
