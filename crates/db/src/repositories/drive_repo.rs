//! Repository for the `placement_drives` table.

use placement_core::drive::{DriveStatus, PlacementDriveDraft};
use placement_core::listing::escape_like;
use placement_core::notification::OutboxEventType;
use placement_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::drive::{DriveFilter, PlacementDrive};
use crate::models::outbox::NewOutboxEvent;
use crate::repositories::OutboxRepo;

const COLUMNS: &str = "\
    id, placement_drive_title, session_id, jnf_id, company_details, job_profiles, \
    eligibility_criteria, bond_details, point_of_contact, application_details, \
    status, created_at, updated_at";

pub struct DriveRepo;

impl DriveRepo {
    /// Insert a drive and record its `drive.created` event.
    pub async fn create(
        pool: &PgPool,
        draft: &PlacementDriveDraft,
    ) -> Result<PlacementDrive, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO placement_drives (placement_drive_title, session_id, jnf_id, \
                 company_details, job_profiles, eligibility_criteria, bond_details, \
                 point_of_contact, application_details, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let drive = sqlx::query_as::<_, PlacementDrive>(&query)
            .bind(draft.placement_drive_title.trim())
            .bind(draft.session_id)
            .bind(draft.jnf_id)
            .bind(Json(&draft.company_details))
            .bind(Json(&draft.job_profiles))
            .bind(Json(&draft.eligibility_criteria))
            .bind(Json(&draft.bond_details))
            .bind(Json(&draft.point_of_contact))
            .bind(Json(&draft.application_details))
            .bind(DriveStatus::InProgress.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let event = NewOutboxEvent::for_drive(&drive, OutboxEventType::DriveCreated);
        OutboxRepo::insert(&mut tx, &event).await?;

        tx.commit().await?;
        Ok(drive)
    }

    /// List drives, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &DriveFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PlacementDrive>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_drives \
             WHERE ($1::TEXT IS NULL OR status = $1) \
               AND ($2::BIGINT IS NULL OR session_id = $2) \
               AND ($3::TEXT IS NULL OR company_details->>'name' ILIKE '%' || $3 || '%' ESCAPE '\\') \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PlacementDrive>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.session_id)
            .bind(
                filter
                    .company
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(escape_like),
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlacementDrive>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM placement_drives WHERE id = $1");
        sqlx::query_as::<_, PlacementDrive>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: DriveStatus,
    ) -> Result<Option<PlacementDrive>, sqlx::Error> {
        let query = format!(
            "UPDATE placement_drives SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacementDrive>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
