//! Route definitions for the `/placement-session` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/placement-session`.
///
/// ```text
/// POST   /create          -> create_session
/// GET    /all             -> list_sessions
/// GET    /active          -> active_session
/// PUT    /{id}/activate   -> activate_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(sessions::create_session))
        .route("/all", get(sessions::list_sessions))
        .route("/active", get(sessions::active_session))
        .route("/{id}/activate", put(sessions::activate_session))
}
