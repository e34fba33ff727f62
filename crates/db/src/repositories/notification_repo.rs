//! Repository for the `notifications` table.

use placement_core::notification::{
    CreateNotification, RenderedNotification, ORIGIN_AUTOMATIC, ORIGIN_MANUAL,
};
use placement_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::Notification;

const COLUMNS: &str = "\
    id, placement_drive_id, subject, content, notification_type, origin, outbox_id, created_at";

pub struct NotificationRepo;

impl NotificationRepo {
    /// Store a notification written by an admin.
    pub async fn create_manual(
        pool: &PgPool,
        drive_id: DbId,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (placement_drive_id, subject, content, notification_type, origin) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(drive_id)
            .bind(input.subject.trim())
            .bind(&input.content)
            .bind(input.notification_type.as_str())
            .bind(ORIGIN_MANUAL)
            .fetch_one(pool)
            .await
    }

    /// Store the notification rendered from an outbox event.
    ///
    /// Idempotent per outbox event: returns `false` if a notification for
    /// `outbox_id` already exists.
    pub async fn create_from_outbox(
        pool: &PgPool,
        drive_id: DbId,
        outbox_id: DbId,
        rendered: &RenderedNotification,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications \
                 (placement_drive_id, subject, content, notification_type, origin, outbox_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (outbox_id) DO NOTHING",
        )
        .bind(drive_id)
        .bind(&rendered.subject)
        .bind(&rendered.content)
        .bind(rendered.notification_type.as_str())
        .bind(ORIGIN_AUTOMATIC)
        .bind(outbox_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Notifications of a drive, newest first.
    pub async fn list_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE placement_drive_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(drive_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a notification of a drive. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, drive_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM notifications WHERE id = $1 AND placement_drive_id = $2")
                .bind(id)
                .bind(drive_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
