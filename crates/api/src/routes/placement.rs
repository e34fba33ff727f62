//! Route definitions for the `/placement` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{applications, notifications, offers, placement, rounds};
use crate::state::AppState;

/// Routes mounted at `/placement`.
///
/// ```text
/// POST   /create-placement-drive                          -> create_drive
/// POST   /create-from-jnf/{jnf_id}                        -> create_drive_from_jnf
/// POST   /validate-step                                   -> validate_step
/// GET    /all                                             -> list_drives
/// GET    /{id}/getone                                     -> get_drive
/// PUT    /{id}/update-status                              -> update_drive_status
///
/// POST   /{id}/apply/{student_id}                         -> apply
/// GET    /{id}/applications                               -> list_applications
///
/// GET    /{id}/rounds/all                                 -> get_round_details
/// POST   /{id}/add-round                                  -> add_round
/// PUT    /{id}/rounds/{round_id}/update-round             -> update_round
/// POST   /{id}/rounds/{round_id}/start                    -> start_round
/// POST   /{id}/rounds/{round_id}/complete                 -> complete_round
/// GET    /{id}/rounds/{round_id}/applicant-students       -> applicant_students
/// GET    /{id}/rounds/{round_id}/appeared-students        -> appeared_students
/// GET    /{id}/rounds/{round_id}/selected-students        -> selected_students
/// PUT    /{id}/rounds/{round_id}/update-appeared-students -> update_appeared_students
/// PUT    /{id}/rounds/{round_id}/update-selected-students -> update_selected_students
/// PUT    /{id}/rounds/{round_id}/declare-results          -> declare_results
/// GET    /{id}/rounds/{round_id}/detailed-results         -> detailed_results
///
/// POST   /{id}/notifications/add-new                      -> create_notification
/// GET    /{id}/notifications/all                          -> list_notifications
/// DELETE /{id}/notifications/{notification_id}/delete     -> delete_notification
/// GET    /{id}/notifications/outbox                       -> list_outbox
///
/// GET    /{id}/offer-letters                              -> list_offers
/// POST   /{id}/offer-letters                              -> create_offer
/// PUT    /{id}/offer-letters/{offer_id}/respond           -> respond_to_offer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-placement-drive", post(placement::create_drive))
        .route(
            "/create-from-jnf/{jnf_id}",
            post(placement::create_drive_from_jnf),
        )
        .route("/validate-step", post(placement::validate_step))
        .route("/all", get(placement::list_drives))
        .route("/{id}/getone", get(placement::get_drive))
        .route("/{id}/update-status", put(placement::update_drive_status))
        // Applications
        .route("/{id}/apply/{student_id}", post(applications::apply))
        .route("/{id}/applications", get(applications::list_applications))
        // Rounds
        .route("/{id}/rounds/all", get(rounds::get_round_details))
        .route("/{id}/add-round", post(rounds::add_round))
        .route(
            "/{id}/rounds/{round_id}/update-round",
            put(rounds::update_round),
        )
        .route("/{id}/rounds/{round_id}/start", post(rounds::start_round))
        .route(
            "/{id}/rounds/{round_id}/complete",
            post(rounds::complete_round),
        )
        .route(
            "/{id}/rounds/{round_id}/applicant-students",
            get(rounds::applicant_students),
        )
        .route(
            "/{id}/rounds/{round_id}/appeared-students",
            get(rounds::appeared_students),
        )
        .route(
            "/{id}/rounds/{round_id}/selected-students",
            get(rounds::selected_students),
        )
        .route(
            "/{id}/rounds/{round_id}/update-appeared-students",
            put(rounds::update_appeared_students),
        )
        .route(
            "/{id}/rounds/{round_id}/update-selected-students",
            put(rounds::update_selected_students),
        )
        .route(
            "/{id}/rounds/{round_id}/declare-results",
            put(rounds::declare_results),
        )
        .route(
            "/{id}/rounds/{round_id}/detailed-results",
            get(rounds::detailed_results),
        )
        // Notifications
        .route(
            "/{id}/notifications/add-new",
            post(notifications::create_notification),
        )
        .route(
            "/{id}/notifications/all",
            get(notifications::list_notifications),
        )
        .route(
            "/{id}/notifications/{notification_id}/delete",
            delete(notifications::delete_notification),
        )
        .route("/{id}/notifications/outbox", get(notifications::list_outbox))
        // Offer letters
        .route(
            "/{id}/offer-letters",
            get(offers::list_offers).post(offers::create_offer),
        )
        .route(
            "/{id}/offer-letters/{offer_id}/respond",
            put(offers::respond_to_offer),
        )
}
