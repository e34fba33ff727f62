//! Route definitions for drive-independent notification operations.

use axum::routing::post;
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /outbox/{id}/retry   -> retry_outbox_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/outbox/{id}/retry",
        post(notifications::retry_outbox_event),
    )
}
