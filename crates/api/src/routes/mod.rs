pub mod health;
pub mod jnf;
pub mod notification;
pub mod placement;
pub mod session;
pub mod student;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /placement/...            drives, applications, rounds, notifications, offers
/// /notifications/outbox/... outbox operations
/// /student/...              students and debour
/// /placement-session/...    placement sessions
/// /jnf/...                  job notification forms
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/placement", placement::router())
        .nest("/notifications", notification::router())
        .nest("/student", student::router())
        .nest("/placement-session", session::router())
        .nest("/jnf", jnf::router())
}
