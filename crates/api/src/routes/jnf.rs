//! Route definitions for the `/jnf` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::jnf;
use crate::state::AppState;

/// Routes mounted at `/jnf`.
///
/// ```text
/// POST   /submit          -> submit_jnf
/// POST   /validate-step   -> validate_step
/// GET    /all             -> list_jnfs
/// GET    /{id}            -> get_jnf
/// PUT    /{id}/status     -> review_jnf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(jnf::submit_jnf))
        .route("/validate-step", post(jnf::validate_step))
        .route("/all", get(jnf::list_jnfs))
        .route("/{id}", get(jnf::get_jnf))
        .route("/{id}/status", put(jnf::review_jnf))
}
