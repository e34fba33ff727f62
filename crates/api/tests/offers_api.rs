//! Integration tests for offer letters.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    add_round, apply, body_json, build_test_app, get, post_json, put_json, register_student,
    round_path,
};
use placement_api::background::offer_expiry;
use placement_db::repositories::OfferRepo;
use serde_json::json;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// A drive whose only round is completed with the first of two students
/// selected. Returns the drive and the (selected, rejected) student IDs.
async fn completed_drive(pool: &PgPool) -> (i64, i64, i64) {
    let drive_id = common::create_drive(pool).await;
    let selected = register_student(pool, "21CS001", 8.5).await;
    let rejected = register_student(pool, "21CS002", 8.0).await;
    apply(pool, drive_id, selected).await;
    apply(pool, drive_id, rejected).await;

    let round = add_round(pool, drive_id, "Interview").await;
    let path = round_path(drive_id, round["id"].as_i64().unwrap());
    put_json(
        build_test_app(pool.clone()),
        &format!("{path}/update-appeared-students"),
        json!({ "student_ids": [selected, rejected] }),
    )
    .await;
    put_json(
        build_test_app(pool.clone()),
        &format!("{path}/update-selected-students"),
        json!({ "student_ids": [selected] }),
    )
    .await;
    post_json(build_test_app(pool.clone()), &format!("{path}/start"), json!({})).await;
    let response = post_json(build_test_app(pool.clone()), &format!("{path}/complete"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    (drive_id, selected, rejected)
}

fn offers_uri(drive_id: i64) -> String {
    format!("/api/v1/placement/{drive_id}/offer-letters")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn offers_go_only_to_selected_students(pool: PgPool) {
    let (drive_id, selected, rejected) = completed_drive(&pool).await;
    let expiry = (Utc::now().date_naive() + Duration::days(7)).to_string();

    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": rejected, "content": "<p>Offer</p>" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": selected, "content": "<p>Offer</p>", "expiry_date": expiry }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let offer = body_json(response).await["data"].clone();
    assert_eq!(offer["status"], "pending");

    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": selected, "content": "<p>Again</p>" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let list = body_json(get(build_test_app(pool.clone()), &offers_uri(drive_id)).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let outbox = body_json(
        get(
            build_test_app(pool),
            &format!("/api/v1/placement/{drive_id}/notifications/outbox"),
        )
        .await,
    )
    .await;
    assert!(outbox["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["event_type"] == "offer.sent" && e["payload"]["student_id"] == selected));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn offers_need_a_completed_round(pool: PgPool) {
    let drive_id = common::create_drive(&pool).await;
    let student = register_student(&pool, "21CS001", 8.0).await;

    let response = post_json(
        build_test_app(pool),
        &offers_uri(drive_id),
        json!({ "student_id": student, "content": "<p>Offer</p>" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn past_expiry_date_is_rejected(pool: PgPool) {
    let (drive_id, selected, _) = completed_drive(&pool).await;
    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();

    let response = post_json(
        build_test_app(pool),
        &offers_uri(drive_id),
        json!({ "student_id": selected, "content": "<p>Offer</p>", "expiry_date": yesterday }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_is_recorded_once(pool: PgPool) {
    let (drive_id, selected, _) = completed_drive(&pool).await;
    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": selected, "content": "<p>Offer</p>" }),
    )
    .await;
    let offer_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let respond_uri = format!("{}/{offer_id}/respond", offers_uri(drive_id));

    let response = put_json(build_test_app(pool.clone()), &respond_uri, json!({ "accept": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let offer = body_json(response).await["data"].clone();
    assert_eq!(offer["status"], "accepted");
    assert!(offer["responded_at"].is_string());

    let response = put_json(build_test_app(pool), &respond_uri, json!({ "accept": false })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lapsed_offer_expires_on_response(pool: PgPool) {
    let (drive_id, selected, _) = completed_drive(&pool).await;
    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": selected, "content": "<p>Offer</p>" }),
    )
    .await;
    let offer_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    sqlx::query("UPDATE offer_letters SET expiry_date = CURRENT_DATE - 2 WHERE id = $1")
        .bind(offer_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("{}/{offer_id}/respond", offers_uri(drive_id)),
        json!({ "accept": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let list = body_json(get(build_test_app(pool), &offers_uri(drive_id)).await).await;
    assert_eq!(list["data"][0]["status"], "expired");
}

/// Send an offer to the selected student and return its ID.
async fn send_offer(pool: &PgPool, drive_id: i64, student_id: i64) -> i64 {
    let expiry = (Utc::now().date_naive() + Duration::days(7)).to_string();
    let response = post_json(
        build_test_app(pool.clone()),
        &offers_uri(drive_id),
        json!({ "student_id": student_id, "content": "<p>Offer</p>", "expiry_date": expiry }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn backdate_expiry(pool: &PgPool, offer_id: i64) {
    sqlx::query("UPDATE offer_letters SET expiry_date = CURRENT_DATE - 1 WHERE id = $1")
        .bind(offer_id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_expires_only_overdue_pending_offers(pool: PgPool) {
    let (drive_id, selected, _) = completed_drive(&pool).await;
    let offer_id = send_offer(&pool, drive_id, selected).await;
    let today = Utc::now().date_naive();

    assert_eq!(OfferRepo::expire_overdue(&pool, today).await.unwrap(), 0);

    backdate_expiry(&pool, offer_id).await;
    assert_eq!(OfferRepo::expire_overdue(&pool, today).await.unwrap(), 1);
    assert_eq!(OfferRepo::expire_overdue(&pool, today).await.unwrap(), 0);

    let offer = OfferRepo::find(&pool, drive_id, offer_id).await.unwrap().unwrap();
    assert_eq!(offer.status, "expired");
    assert!(offer.responded_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expiry_job_sweeps_until_cancelled(pool: PgPool) {
    let (drive_id, selected, _) = completed_drive(&pool).await;
    let offer_id = send_offer(&pool, drive_id, selected).await;
    backdate_expiry(&pool, offer_id).await;

    let cancel = CancellationToken::new();
    let handle = tokio::spawn(offer_expiry::run(
        pool.clone(),
        std::time::Duration::from_millis(50),
        cancel.clone(),
    ));

    let expired = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            let offer = OfferRepo::find(&pool, drive_id, offer_id).await.unwrap().unwrap();
            if offer.status == "expired" {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    })
    .await;
    assert!(expired.is_ok(), "expiry job did not expire the overdue offer");

    cancel.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("expiry job stops after cancellation")
        .unwrap();
}
