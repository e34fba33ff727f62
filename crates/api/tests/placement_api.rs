//! Integration tests for drives, the drive/JNF wizards, JNFs and sessions.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, put_json, valid_drive_body};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Drive creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_drive_assigns_profile_ids_and_queues_notification(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/placement/create-placement-drive",
        valid_drive_body("Acme 2025"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let drive = body_json(response).await["data"].clone();
    assert_eq!(drive["status"], "in_progress");
    assert_eq!(drive["job_profiles"][0]["profile_id"], "profile-1");
    let drive_id = drive["id"].as_i64().unwrap();

    let outbox = body_json(
        get(
            build_test_app(pool),
            &format!("/api/v1/placement/{drive_id}/notifications/outbox"),
        )
        .await,
    )
    .await;
    let events = outbox["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event_type"], "drive.created");
    assert_eq!(events[0]["status"], "pending");
    assert_eq!(events[0]["payload"]["drive_title"], "Acme 2025");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_drive_reports_every_problem(pool: PgPool) {
    let mut body = valid_drive_body("");
    body["job_profiles"][0]["job_type"] = json!("internship");
    body["point_of_contact"][0]["mobile"] = json!("12");
    body["application_details"] = json!({});

    let response = post_json(
        build_test_app(pool),
        "/api/v1/placement/create-placement-drive",
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Placement drive title is required"));
    assert!(message.contains("stipend is required"));
    assert!(message.contains("Application deadline is required"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_drive_with_unknown_session_returns_404(pool: PgPool) {
    let mut body = valid_drive_body("Acme");
    body["session_id"] = json!(999_999);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/placement/create-placement-drive",
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Wizard step validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_step_checks_only_that_step(pool: PgPool) {
    let mut draft = valid_drive_body("Acme");
    draft["point_of_contact"] = json!([]);

    // Step 0 (company details) passes even though contacts are missing.
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/placement/validate-step",
        json!({ "step": 0, "draft": draft.clone() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], true);
    assert_eq!(json["data"]["label"], "Company Details");

    // Step 4 blocks on the missing contact.
    let response = post_json(
        build_test_app(pool),
        "/api/v1/placement/validate-step",
        json!({ "step": 4, "draft": draft }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], false);
    assert!(!json["data"]["errors"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validate_step_rejects_unknown_step(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/placement/validate-step",
        json!({ "step": 9, "draft": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_status_and_company(pool: PgPool) {
    let first = common::create_drive(&pool).await;
    let mut other = valid_drive_body("Globex Drive");
    other["company_details"]["name"] = json!("Globex");
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/placement/create-placement-drive",
        other,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/placement/{first}/update-status"),
        json!({ "status": "hold" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "hold");

    let all = body_json(get(build_test_app(pool.clone()), "/api/v1/placement/all").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let held = body_json(
        get(build_test_app(pool.clone()), "/api/v1/placement/all?status=hold").await,
    )
    .await;
    assert_eq!(held["data"].as_array().unwrap().len(), 1);
    assert_eq!(held["data"][0]["id"], first);

    let globex = body_json(
        get(build_test_app(pool), "/api/v1/placement/all?company=glob").await,
    )
    .await;
    assert_eq!(globex["data"].as_array().unwrap().len(), 1);
    assert_eq!(globex["data"][0]["company_details"]["name"], "Globex");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn company_filter_treats_wildcards_literally(pool: PgPool) {
    common::create_drive(&pool).await;

    for company in ["_", "%25", "%5C"] {
        let found = body_json(
            get(
                build_test_app(pool.clone()),
                &format!("/api/v1/placement/all?company={company}"),
            )
            .await,
        )
        .await;
        assert!(
            found["data"].as_array().unwrap().is_empty(),
            "company={company} matched a drive"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_drive_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/placement/424242/getone").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// JNF
// ---------------------------------------------------------------------------

fn jnf_body() -> serde_json::Value {
    let mut body = valid_drive_body("ignored");
    let object = body.as_object_mut().unwrap();
    object.remove("placement_drive_title");
    body
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn jnf_requires_company_email(pool: PgPool) {
    let mut body = jnf_body();
    body["company_details"]["email"] = json!("");

    let response = post_json(build_test_app(pool), "/api/v1/jnf/submit", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Company email is required"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_jnf_cascades_into_a_drive(pool: PgPool) {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/jnf/submit", jnf_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let jnf = body_json(response).await["data"].clone();
    assert_eq!(jnf["status"], "submitted");
    let jnf_id = jnf["id"].as_i64().unwrap();

    // Not approved yet.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/placement/create-from-jnf/{jnf_id}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/jnf/{jnf_id}/status"),
        json!({ "status": "approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Reviews are final.
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/jnf/{jnf_id}/status"),
        json!({ "status": "rejected" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/placement/create-from-jnf/{jnf_id}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let drive = body_json(response).await["data"].clone();
    assert_eq!(drive["placement_drive_title"], "Acme Placement Drive");
    assert_eq!(drive["jnf_id"], jnf_id);
    assert_eq!(drive["eligibility_criteria"]["min_cgpa"], 7.0);
    assert_eq!(
        drive["job_profiles"][0]["selection_process"]["rounds"][1]["round_name"],
        "Interview"
    );

    let approved = body_json(
        get(build_test_app(pool), "/api/v1/jnf/all?status=approved").await,
    )
    .await;
    assert_eq!(approved["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn jnf_validate_step_uses_jnf_steps(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/jnf/validate-step",
        json!({ "step": 0, "jnf": { "company_details": { "name": "Acme" } } }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["valid"], false);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/jnf/validate-step",
        json!({ "step": 4, "jnf": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_one_session_is_active(pool: PgPool) {
    let active = body_json(get(build_test_app(pool.clone()), "/api/v1/placement-session/active").await).await;
    assert!(active["data"].is_null());

    let mut ids = Vec::new();
    for (name, start, end) in [
        ("2024-25", "2024-07-01", "2025-06-30"),
        ("2025-26", "2025-07-01", "2026-06-30"),
    ] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/placement-session/create",
            json!({ "name": name, "start_date": start, "end_date": end }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }

    for id in &ids {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/placement-session/{id}/activate"),
            json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let active = body_json(get(build_test_app(pool.clone()), "/api/v1/placement-session/active").await).await;
    assert_eq!(active["data"]["id"], ids[1]);

    let all = body_json(get(build_test_app(pool), "/api/v1/placement-session/all").await).await;
    let active_count = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["is_active"] == true)
        .count();
    assert_eq!(active_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_must_end_after_it_starts(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/placement-session/create",
        json!({ "name": "Backwards", "start_date": "2025-07-01", "end_date": "2025-01-01" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_drive_with_past_deadline_is_listed(pool: PgPool) {
    let mut body = valid_drive_body("Acme Drive");
    body["application_details"]["application_deadline"] = json!("2025-06-01");

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/placement/create-placement-drive",
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let all = body_json(get(build_test_app(pool), "/api/v1/placement/all").await).await;
    let drives = all["data"].as_array().unwrap();
    assert!(drives.iter().any(|d| {
        d["placement_drive_title"] == "Acme Drive"
            && d["application_details"]["application_deadline"] == "2025-06-01"
    }));
}
