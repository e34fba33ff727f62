//! Repository for the `placement_rounds` table.
//!
//! Every write bumps `version` and is guarded by the version the caller
//! read, so a stale write affects no rows and the method returns `None`.

use placement_core::round::{next_round_number, RoundStatus};
use placement_core::types::DbId;
use sqlx::PgPool;

use crate::models::outbox::NewOutboxEvent;
use crate::models::round::{CreateRound, PlacementRound, UpdateRound};
use crate::repositories::OutboxRepo;

const COLUMNS: &str = "\
    id, placement_drive_id, round_number, round_name, round_type, venue, \
    start_time, end_time, round_duration_hours, round_duration_minutes, \
    round_status, appeared_students, selected_students, \
    result_message, result_description, result_declared_at, \
    version, created_at, updated_at";

pub struct RoundRepo;

impl RoundRepo {
    /// All rounds of a drive in round order.
    pub async fn list_for_drive(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Vec<PlacementRound>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_rounds \
             WHERE placement_drive_id = $1 \
             ORDER BY round_number ASC"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(drive_id)
            .fetch_all(pool)
            .await
    }

    /// Find a round that belongs to the given drive.
    pub async fn find(
        pool: &PgPool,
        drive_id: DbId,
        round_id: DbId,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_rounds \
             WHERE id = $1 AND placement_drive_id = $2"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(drive_id)
            .fetch_optional(pool)
            .await
    }

    /// The round numbered `round_number` in a drive.
    pub async fn find_by_number(
        pool: &PgPool,
        drive_id: DbId,
        round_number: i32,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_rounds \
             WHERE placement_drive_id = $1 AND round_number = $2"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(drive_id)
            .bind(round_number)
            .fetch_optional(pool)
            .await
    }

    /// The highest-numbered completed round of a drive.
    pub async fn last_completed(
        pool: &PgPool,
        drive_id: DbId,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_rounds \
             WHERE placement_drive_id = $1 AND round_status = $2 \
             ORDER BY round_number DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(drive_id)
            .bind(RoundStatus::Completed.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Append a round to a drive.
    ///
    /// The drive row is locked for the duration of the transaction so
    /// concurrent additions get consecutive numbers. Returns `None` if the
    /// drive does not exist.
    pub async fn create(
        pool: &PgPool,
        drive_id: DbId,
        input: &CreateRound,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM placement_drives WHERE id = $1 FOR UPDATE",
        )
        .bind(drive_id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM placement_rounds WHERE placement_drive_id = $1",
        )
        .bind(drive_id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO placement_rounds (placement_drive_id, round_number, round_name, \
                 round_type, venue, start_time, end_time, round_duration_hours, \
                 round_duration_minutes, round_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let round = sqlx::query_as::<_, PlacementRound>(&query)
            .bind(drive_id)
            .bind(next_round_number(existing))
            .bind(input.round_name.trim())
            .bind(input.round_type.trim())
            .bind(input.venue.trim())
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.round_duration_hours)
            .bind(input.round_duration_minutes)
            .bind(RoundStatus::Upcoming.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(round))
    }

    /// Overwrite every editable field of a round.
    pub async fn update(
        pool: &PgPool,
        round_id: DbId,
        input: &UpdateRound,
        status: RoundStatus,
        event: Option<&NewOutboxEvent>,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE placement_rounds \
             SET round_name = $3, round_type = $4, venue = $5, start_time = $6, \
                 end_time = $7, round_duration_hours = $8, round_duration_minutes = $9, \
                 round_status = $10, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let round = sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(input.version)
            .bind(input.round_name.trim())
            .bind(input.round_type.trim())
            .bind(input.venue.trim())
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.round_duration_hours)
            .bind(input.round_duration_minutes)
            .bind(status.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        Self::finish(tx, round, event).await
    }

    /// Change only the status of a round.
    pub async fn set_status(
        pool: &PgPool,
        round_id: DbId,
        version: i32,
        status: RoundStatus,
        event: Option<&NewOutboxEvent>,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE placement_rounds \
             SET round_status = $3, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let round = sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(version)
            .bind(status.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        Self::finish(tx, round, event).await
    }

    /// Replace the appeared cohort.
    pub async fn set_appeared(
        pool: &PgPool,
        round_id: DbId,
        version: i32,
        student_ids: &[DbId],
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let query = format!(
            "UPDATE placement_rounds \
             SET appeared_students = $3, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(version)
            .bind(student_ids)
            .fetch_optional(pool)
            .await
    }

    /// Replace the selected cohort.
    pub async fn set_selected(
        pool: &PgPool,
        round_id: DbId,
        version: i32,
        student_ids: &[DbId],
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let query = format!(
            "UPDATE placement_rounds \
             SET selected_students = $3, version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(version)
            .bind(student_ids)
            .fetch_optional(pool)
            .await
    }

    /// Store the result announcement and refresh `result_declared_at`.
    pub async fn declare_results(
        pool: &PgPool,
        round_id: DbId,
        version: i32,
        message: &str,
        description: &str,
        event: &NewOutboxEvent,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE placement_rounds \
             SET result_message = $3, result_description = $4, \
                 result_declared_at = NOW(), version = version + 1 \
             WHERE id = $1 AND version = $2 \
             RETURNING {COLUMNS}"
        );
        let round = sqlx::query_as::<_, PlacementRound>(&query)
            .bind(round_id)
            .bind(version)
            .bind(message.trim())
            .bind(description.trim())
            .fetch_optional(&mut *tx)
            .await?;

        Self::finish(tx, round, Some(event)).await
    }

    /// Record the event and commit when the guarded update matched a row;
    /// roll back otherwise.
    async fn finish(
        mut tx: sqlx::Transaction<'_, sqlx::Postgres>,
        round: Option<PlacementRound>,
        event: Option<&NewOutboxEvent>,
    ) -> Result<Option<PlacementRound>, sqlx::Error> {
        let Some(round) = round else {
            tx.rollback().await?;
            return Ok(None);
        };
        if let Some(event) = event {
            OutboxRepo::insert(&mut tx, event).await?;
        }
        tx.commit().await?;
        Ok(Some(round))
    }
}
