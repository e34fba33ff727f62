#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use placement_api::config::{OutboxSettings, ServerConfig};
use placement_api::router::build_app_router;
use placement_api::state::AppState;
use placement_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        outbox: OutboxSettings::default(),
        offer_expiry_interval_secs: 300,
    }
}

/// Build the full application router, with the production middleware
/// stack, on the given pool. No dispatcher runs, so outbox events stay
/// pending.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A drive payload that passes every wizard step.
pub fn valid_drive_body(title: &str) -> Value {
    json!({
        "placement_drive_title": title,
        "company_details": { "name": "Acme", "email": "hr@acme.com" },
        "job_profiles": [{
            "designation": "SDE",
            "job_type": "full_time",
            "ctc": "12 LPA",
            "eligible_branches": {
                "btech": [{ "name": "CSE", "eligible": true }]
            },
            "selection_process": {
                "rounds": [
                    { "round_number": 1, "round_name": "Online Test" },
                    { "round_number": 2, "round_name": "Interview" }
                ]
            }
        }],
        "eligibility_criteria": { "min_cgpa": 7.0, "backlog_allowed": false },
        "point_of_contact": [{
            "name": "Jo",
            "designation": "HR",
            "mobile": "9876543210",
            "email": "jo@acme.com"
        }],
        "application_details": { "application_deadline": "2099-12-31" }
    })
}

/// Create a drive through the API and return its ID.
pub async fn create_drive(pool: &PgPool) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/placement/create-placement-drive",
        valid_drive_body("Acme Campus Drive"),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Register a CSE student with the given roll number and CGPA.
pub async fn register_student(pool: &PgPool, roll: &str, cgpa: f64) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/student/register/admin",
        json!({
            "personal_info": {
                "name": format!("Student {roll}"),
                "roll_number": roll,
                "email": format!("{}@college.edu", roll.to_lowercase()),
                "department": "CSE",
                "batch": "2025"
            },
            "academics": { "cgpa": cgpa, "backlogs": 0 }
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Add a round to a drive and return the round JSON.
pub async fn add_round(pool: &PgPool, drive_id: i64, name: &str) -> Value {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/placement/{drive_id}/add-round"),
        json!({ "round_name": name, "round_type": "written", "venue": "Hall A" }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"].clone()
}

/// Apply a student to a drive through the API.
pub async fn apply(pool: &PgPool, drive_id: i64, student_id: i64) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/placement/{drive_id}/apply/{student_id}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), 201);
}

/// Path prefix of a round's endpoints.
pub fn round_path(drive_id: i64, round_id: i64) -> String {
    format!("/api/v1/placement/{drive_id}/rounds/{round_id}")
}
