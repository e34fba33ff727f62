//! Repository for the `notification_outbox` table.
//!
//! Events are written in the same transaction as the change that caused
//! them and delivered later by the dispatcher. Claiming pushes
//! `next_attempt_at` forward by a lease so concurrent dispatchers skip
//! rows that are already being processed.

use placement_core::notification::{OUTBOX_DEAD, OUTBOX_DELIVERED, OUTBOX_PENDING};
use placement_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::outbox::{NewOutboxEvent, OutboxEvent};

const COLUMNS: &str = "\
    id, placement_drive_id, event_type, payload, status, attempts, \
    next_attempt_at, last_error, created_at, delivered_at";

/// How long a claimed event is hidden from other dispatchers.
const CLAIM_LEASE_SECS: i64 = 60;

pub struct OutboxRepo;

impl OutboxRepo {
    /// Record an event on an open connection or transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        event: &NewOutboxEvent,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO notification_outbox (placement_drive_id, event_type, payload, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(event.placement_drive_id)
        .bind(event.event_type.as_str())
        .bind(&event.payload)
        .bind(OUTBOX_PENDING)
        .fetch_one(conn)
        .await
    }

    /// Claim up to `limit` pending events whose attempt time has come.
    ///
    /// Uses `FOR UPDATE SKIP LOCKED` so two dispatchers never claim the
    /// same row.
    pub async fn claim_due(pool: &PgPool, limit: i64) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE notification_outbox \
             SET next_attempt_at = NOW() + make_interval(secs => $2) \
             WHERE id IN ( \
                 SELECT id FROM notification_outbox \
                 WHERE status = $3 AND next_attempt_at <= NOW() \
                 ORDER BY next_attempt_at ASC, id ASC \
                 LIMIT $1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        let mut events = sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(limit)
            .bind(CLAIM_LEASE_SECS as f64)
            .bind(OUTBOX_PENDING)
            .fetch_all(pool)
            .await?;
        events.sort_by_key(|e| e.id);
        if !events.is_empty() {
            tracing::debug!(claimed = events.len(), "Claimed outbox events");
        }
        Ok(events)
    }

    pub async fn mark_delivered(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_outbox \
             SET status = $2, attempts = attempts + 1, delivered_at = NOW(), last_error = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .bind(OUTBOX_DELIVERED)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a failed attempt and schedule the next one.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_outbox \
             SET attempts = attempts + 1, last_error = $2, next_attempt_at = $3 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .bind(retry_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a final failed attempt and stop retrying.
    pub async fn mark_dead(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_outbox \
             SET status = $3, attempts = attempts + 1, last_error = $2 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(error)
        .bind(OUTBOX_DEAD)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OutboxEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_outbox WHERE id = $1");
        sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All events of a drive, newest first.
    pub async fn list_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<OutboxEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_outbox \
             WHERE placement_drive_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(drive_id)
            .fetch_all(pool)
            .await
    }

    /// Put a dead event back in the queue with a fresh attempt budget.
    ///
    /// Returns `None` if the event is not dead.
    pub async fn retry(pool: &PgPool, id: DbId) -> Result<Option<OutboxEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE notification_outbox \
             SET status = $2, attempts = 0, next_attempt_at = NOW(), last_error = NULL \
             WHERE id = $1 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutboxEvent>(&query)
            .bind(id)
            .bind(OUTBOX_PENDING)
            .bind(OUTBOX_DEAD)
            .fetch_optional(pool)
            .await
    }
}
