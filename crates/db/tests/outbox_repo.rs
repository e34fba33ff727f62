mod common;

use chrono::Utc;
use placement_core::notification::{render_event, OutboxEventType};
use placement_db::repositories::{NotificationRepo, OutboxRepo};
use sqlx::PgPool;

use common::create_drive;

#[sqlx::test(migrations = "../../db/migrations")]
async fn creating_a_drive_queues_an_event(pool: PgPool) {
    let drive = create_drive(&pool).await;

    let events = OutboxRepo::list_for_drive(&pool, drive.id).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "drive.created");
    assert_eq!(events[0].status, "pending");
    assert_eq!(events[0].payload["drive_title"], "Acme Campus Drive");
    assert_eq!(events[0].payload["company_name"], "Acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claimed_events_are_hidden_until_lease_expires(pool: PgPool) {
    let drive = create_drive(&pool).await;

    let first = OutboxRepo::claim_due(&pool, 10).await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].placement_drive_id, drive.id);

    let second = OutboxRepo::claim_due(&pool, 10).await.unwrap();
    assert!(second.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failures_reschedule_then_die_and_retry_revives(pool: PgPool) {
    let drive = create_drive(&pool).await;
    let event = OutboxRepo::claim_due(&pool, 10).await.unwrap().remove(0);

    OutboxRepo::mark_failed(&pool, event.id, "timeout", Utc::now() - chrono::Duration::seconds(1))
        .await
        .unwrap();
    let again = OutboxRepo::claim_due(&pool, 10).await.unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].attempts, 1);
    assert_eq!(again[0].last_error.as_deref(), Some("timeout"));

    // Only dead events can be retried.
    assert!(OutboxRepo::retry(&pool, event.id).await.unwrap().is_none());

    OutboxRepo::mark_dead(&pool, event.id, "gave up").await.unwrap();
    let dead = OutboxRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(dead.status, "dead");
    assert_eq!(dead.attempts, 2);
    assert!(OutboxRepo::claim_due(&pool, 10).await.unwrap().is_empty());

    let revived = OutboxRepo::retry(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(revived.status, "pending");
    assert_eq!(revived.attempts, 0);
    assert!(revived.last_error.is_none());

    let claimed = OutboxRepo::claim_due(&pool, 10).await.unwrap();
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].placement_drive_id, drive.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn outbox_notification_is_written_once(pool: PgPool) {
    let drive = create_drive(&pool).await;
    let event = OutboxRepo::claim_due(&pool, 10).await.unwrap().remove(0);
    let rendered = render_event(OutboxEventType::DriveCreated, &event.payload);

    let first = NotificationRepo::create_from_outbox(&pool, drive.id, event.id, &rendered)
        .await
        .unwrap();
    let second = NotificationRepo::create_from_outbox(&pool, drive.id, event.id, &rendered)
        .await
        .unwrap();
    assert!(first);
    assert!(!second);

    OutboxRepo::mark_delivered(&pool, event.id).await.unwrap();
    let delivered = OutboxRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(delivered.status, "delivered");
    assert!(delivered.delivered_at.is_some());

    let notifications = NotificationRepo::list_for_drive(&pool, drive.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].origin, "automatic");
    assert_eq!(notifications[0].notification_type, "application");
}
