//! Drives the service layer against a real server bound to a local port.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use serde_json::json;
use sqlx::PgPool;
use tokio::net::TcpListener;

use placement_api::config::{OutboxSettings, ServerConfig};
use placement_api::router::build_app_router;
use placement_api::state::AppState;
use placement_client::{
    ApiClient, ClientConfig, ClientError, PlacementService, PlacementSessionService,
    StudentService,
};
use placement_core::drive::PlacementDriveDraft;
use placement_core::round::CreateRound;
use placement_core::student::RegisterStudent;
use placement_events::EventBus;

/// Serve the API on an ephemeral port and return its host URL.
async fn spawn_server(pool: PgPool) -> String {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        outbox: OutboxSettings::default(),
        offer_expiry_interval_secs: 300,
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
    };
    let app = build_app_router(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn api(host: &str) -> ApiClient {
    ApiClient::new(&ClientConfig::new(host)).unwrap()
}

fn registration(roll: &str) -> RegisterStudent {
    serde_json::from_value(json!({
        "personal_info": {
            "name": format!("Student {roll}"),
            "roll_number": roll,
            "email": format!("{}@college.edu", roll.to_lowercase()),
            "department": "CSE",
            "batch": "2025"
        },
        "academics": { "cgpa": 8.5, "backlogs": 0 }
    }))
    .unwrap()
}

fn drive_draft() -> PlacementDriveDraft {
    serde_json::from_value(json!({
        "placement_drive_title": "Acme Campus Drive",
        "company_details": { "name": "Acme", "email": "hr@acme.com" },
        "job_profiles": [{
            "designation": "SDE",
            "job_type": "full_time",
            "ctc": "12 LPA",
            "eligible_branches": { "btech": [{ "name": "CSE", "eligible": true }] },
            "selection_process": {
                "rounds": [{ "round_number": 1, "round_name": "Online Test" }]
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
    }))
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn round_flow_through_services(pool: PgPool) {
    let host = spawn_server(pool).await;
    let placement = PlacementService::new(api(&host));
    let students = StudentService::new(api(&host));

    let first = students
        .register_student_by_admin(&registration("21CS001"))
        .await
        .unwrap();
    let second = students
        .register_student_by_admin(&registration("21CS002"))
        .await
        .unwrap();

    let drive = placement.create_placement_drive(&drive_draft()).await.unwrap();
    assert_eq!(drive.status, "in_progress");
    placement.apply(drive.id, first.id).await.unwrap();
    placement.apply(drive.id, second.id).await.unwrap();
    assert_eq!(placement.get_applications(drive.id).await.unwrap().len(), 2);

    let round = placement
        .add_round(
            drive.id,
            &CreateRound {
                round_name: "Online Test".into(),
                round_type: "written".into(),
                venue: "Hall A".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(round.round_number, 1);

    let started = placement.start_round(drive.id, round.id, None).await.unwrap();
    assert_eq!(started.round_status, "ongoing");
    let again = placement.start_round(drive.id, round.id, None).await;
    assert_matches!(again, Err(ref e) if e.is_conflict());

    placement
        .update_appeared_students(drive.id, round.id, &[first.id, second.id], None)
        .await
        .unwrap();
    placement
        .update_selected_students(drive.id, round.id, &[first.id], None)
        .await
        .unwrap();
    // Replace, not merge.
    let replaced = placement
        .update_selected_students(drive.id, round.id, &[second.id], None)
        .await
        .unwrap();
    assert_eq!(replaced.selected_students, vec![second.id]);

    let selected = placement
        .get_selected_students(drive.id, round.id)
        .await
        .unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, second.id);

    let results = placement
        .get_detailed_results(drive.id, round.id)
        .await
        .unwrap();
    assert_eq!(results.appeared_count, 2);
    assert_eq!(results.not_selected[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn debour_round_trip(pool: PgPool) {
    let host = spawn_server(pool).await;
    let students = StudentService::new(api(&host));

    let student = students
        .register_student_by_admin(&registration("21CS010"))
        .await
        .unwrap();

    let deboured = students
        .debour_student(student.id, "Skipped two interviews")
        .await
        .unwrap();
    assert!(deboured.is_deboured);

    let again = students.debour_student(student.id, "again").await;
    assert_matches!(again, Err(ref e) if e.is_conflict());

    let revoked = students
        .revoke_debour(student.id, Some("Appeal accepted"))
        .await
        .unwrap();
    assert!(!revoked.is_deboured);
    assert_eq!(
        revoked.debour_details.reason.as_deref(),
        Some("Skipped two interviews")
    );

    let status = students.check_debour_status(student.id).await.unwrap();
    assert!(!status.is_deboured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sessions_activate_one_at_a_time(pool: PgPool) {
    let host = spawn_server(pool).await;
    let sessions = PlacementSessionService::new(api(&host));

    let date = |m: u32, d: u32| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
    let first = sessions
        .create_session("2025-26", date(7, 1), date(12, 31))
        .await
        .unwrap();
    let second = sessions
        .create_session("2025 Winter", date(1, 1), date(6, 30))
        .await
        .unwrap();

    sessions.activate_session(first.id).await.unwrap();
    sessions.activate_session(second.id).await.unwrap();

    let active = sessions.get_active_session().await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
    let all = sessions.get_all_sessions().await.unwrap();
    assert_eq!(all.iter().filter(|s| s.is_active).count(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn errors_carry_server_message_or_fallback(pool: PgPool) {
    let host = spawn_server(pool).await;

    let placement = PlacementService::new(api(&host));
    let missing = placement.get_placement(999_999).await.unwrap_err();
    assert!(missing.is_not_found());
    assert_matches!(missing, ClientError::Api { ref message, .. } if message.contains("999999"));

    // Unknown routes still carry the server's message.
    let wrong_root = PlacementService::new(api(&format!("{host}/missing")));
    let err = wrong_root.get_placement(1).await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 404, ref message } if message.starts_with("No route for GET /missing/")
    );
}
