//! Handlers for drive notifications and the notification outbox.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use placement_core::error::CoreError;
use placement_core::notification::CreateNotification;
use placement_core::types::DbId;
use placement_db::repositories::{NotificationRepo, OutboxRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::find_drive;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// POST /api/v1/placement/{id}/notifications/add-new
pub async fn create_notification(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
    Json(input): Json<CreateNotification>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    find_drive(&state.pool, drive_id).await?;

    let notification = NotificationRepo::create_manual(&state.pool, drive_id, &input).await?;

    tracing::info!(
        drive_id,
        notification_id = notification.id,
        notification_type = input.notification_type.as_str(),
        "Notification created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: notification })))
}

/// GET /api/v1/placement/{id}/notifications/all
///
/// Manual and automatic notifications, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_drive(&state.pool, drive_id).await?;
    let notifications = NotificationRepo::list_for_drive(&state.pool, drive_id).await?;
    Ok(Json(DataResponse { data: notifications }))
}

/// DELETE /api/v1/placement/{id}/notifications/{notification_id}/delete
pub async fn delete_notification(
    State(state): State<AppState>,
    Path((drive_id, notification_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = NotificationRepo::delete(&state.pool, drive_id, notification_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }
    tracing::info!(drive_id, notification_id, "Notification deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Outbox
// ---------------------------------------------------------------------------

/// GET /api/v1/placement/{id}/notifications/outbox
///
/// Outbox events of a drive with their delivery state.
pub async fn list_outbox(
    State(state): State<AppState>,
    Path(drive_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_drive(&state.pool, drive_id).await?;
    let events = OutboxRepo::list_for_drive(&state.pool, drive_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/notifications/outbox/{id}/retry
///
/// Puts a dead event back in the queue with a fresh attempt budget.
pub async fn retry_outbox_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = OutboxRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OutboxEvent",
            id: event_id,
        }))?;

    let event = OutboxRepo::retry(&state.pool, event_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Only dead outbox events can be retried (event {event_id} is {})",
                existing.status
            )))
        })?;

    state.notify_outbox(event.placement_drive_id, &event.event_type);

    tracing::info!(
        outbox_id = event_id,
        drive_id = event.placement_drive_id,
        event_type = %event.event_type,
        "Outbox event requeued"
    );

    Ok(Json(DataResponse { data: event }))
}
