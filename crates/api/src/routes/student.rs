//! Route definitions for the `/student` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/student`.
///
/// ```text
/// GET    /getallstudent          -> list_students
/// GET    /profile/{id}           -> get_profile
/// POST   /register/admin         -> register_by_admin
/// POST   /debour/{id}            -> debour_student
/// POST   /revoke-debour/{id}     -> revoke_debour
/// GET    /debour-status/{id}     -> debour_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getallstudent", get(students::list_students))
        .route("/profile/{id}", get(students::get_profile))
        .route("/register/admin", post(students::register_by_admin))
        .route("/debour/{id}", post(students::debour_student))
        .route("/revoke-debour/{id}", post(students::revoke_debour))
        .route("/debour-status/{id}", get(students::debour_status))
}
