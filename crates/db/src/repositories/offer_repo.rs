//! Repository for the `offer_letters` table.

use placement_core::offer::OfferStatus;
use placement_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::offer::{CreateOfferLetter, OfferLetter};
use crate::models::outbox::NewOutboxEvent;
use crate::repositories::OutboxRepo;

const COLUMNS: &str = "\
    id, placement_drive_id, student_id, status, content, expiry_date, \
    responded_at, created_at, updated_at";

pub struct OfferRepo;

impl OfferRepo {
    /// Issue an offer letter and record its `offer.sent` event.
    pub async fn create(
        pool: &PgPool,
        drive_id: DbId,
        input: &CreateOfferLetter,
        event: &NewOutboxEvent,
    ) -> Result<OfferLetter, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO offer_letters (placement_drive_id, student_id, status, content, expiry_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let offer = sqlx::query_as::<_, OfferLetter>(&query)
            .bind(drive_id)
            .bind(input.student_id)
            .bind(OfferStatus::Pending.as_str())
            .bind(&input.content)
            .bind(input.expiry_date)
            .fetch_one(&mut *tx)
            .await?;

        OutboxRepo::insert(&mut tx, event).await?;

        tx.commit().await?;
        Ok(offer)
    }

    pub async fn list_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<OfferLetter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offer_letters \
             WHERE placement_drive_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, OfferLetter>(&query)
            .bind(drive_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        drive_id: DbId,
        offer_id: DbId,
    ) -> Result<Option<OfferLetter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offer_letters WHERE id = $1 AND placement_drive_id = $2"
        );
        sqlx::query_as::<_, OfferLetter>(&query)
            .bind(offer_id)
            .bind(drive_id)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending offer to `status`. Returns `None` if the offer is no
    /// longer pending.
    pub async fn set_status(
        pool: &PgPool,
        offer_id: DbId,
        status: OfferStatus,
    ) -> Result<Option<OfferLetter>, sqlx::Error> {
        let query = format!(
            "UPDATE offer_letters \
             SET status = $2, \
                 responded_at = CASE WHEN $2 IN ('accepted', 'rejected') THEN NOW() ELSE responded_at END \
             WHERE id = $1 AND status = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OfferLetter>(&query)
            .bind(offer_id)
            .bind(status.as_str())
            .bind(OfferStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Expire every pending offer whose expiry date is before `today`.
    pub async fn expire_overdue(pool: &PgPool, today: Date) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offer_letters SET status = $1 \
             WHERE status = $2 AND expiry_date IS NOT NULL AND expiry_date < $3",
        )
        .bind(OfferStatus::Expired.as_str())
        .bind(OfferStatus::Pending.as_str())
        .bind(today)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
