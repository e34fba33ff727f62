//! Repository for the `placement_sessions` table.

use placement_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, PlacementSession};

const COLUMNS: &str = "id, name, start_date, end_date, is_active, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<PlacementSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO placement_sessions (name, start_date, end_date) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlacementSession>(&query)
            .bind(input.name.trim())
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// All sessions, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PlacementSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM placement_sessions ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, PlacementSession>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlacementSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM placement_sessions WHERE id = $1");
        sqlx::query_as::<_, PlacementSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_active(pool: &PgPool) -> Result<Option<PlacementSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM placement_sessions WHERE is_active");
        sqlx::query_as::<_, PlacementSession>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Make `id` the only active session.
    ///
    /// Returns `None` if the session does not exist; the previous active
    /// session is left untouched in that case.
    pub async fn activate(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PlacementSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE placement_sessions SET is_active = false WHERE is_active AND id <> $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "UPDATE placement_sessions SET is_active = true WHERE id = $1 RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, PlacementSession>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if session.is_some() {
            tx.commit().await?;
        } else {
            tx.rollback().await?;
        }
        Ok(session)
    }
}
