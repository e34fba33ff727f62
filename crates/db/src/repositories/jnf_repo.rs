//! Repository for the `jnfs` table.

use placement_core::jnf::{JnfDraft, JnfStatus};
use placement_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::jnf::Jnf;

const COLUMNS: &str = "\
    id, company_details, job_profiles, eligibility_criteria, bond_details, \
    point_of_contact, application_details, status, created_at, updated_at";

pub struct JnfRepo;

impl JnfRepo {
    /// Store a submitted JNF.
    pub async fn create(pool: &PgPool, draft: &JnfDraft) -> Result<Jnf, sqlx::Error> {
        let query = format!(
            "INSERT INTO jnfs (company_details, job_profiles, eligibility_criteria, \
                 bond_details, point_of_contact, application_details, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Jnf>(&query)
            .bind(Json(&draft.company_details))
            .bind(Json(&draft.job_profiles))
            .bind(Json(&draft.eligibility_criteria))
            .bind(Json(&draft.bond_details))
            .bind(Json(&draft.point_of_contact))
            .bind(Json(&draft.application_details))
            .bind(JnfStatus::Submitted.as_str())
            .fetch_one(pool)
            .await
    }

    /// List JNFs, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<JnfStatus>,
    ) -> Result<Vec<Jnf>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jnfs \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Jnf>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Jnf>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jnfs WHERE id = $1");
        sqlx::query_as::<_, Jnf>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a JNF from `from` to `to`. Returns `None` if the stored status
    /// no longer matches `from`.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: JnfStatus,
        to: JnfStatus,
    ) -> Result<Option<Jnf>, sqlx::Error> {
        let query = format!(
            "UPDATE jnfs SET status = $3 WHERE id = $1 AND status = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Jnf>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }
}
