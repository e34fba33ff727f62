//! Periodic expiry of unanswered offer letters.
//!
//! Pending offers whose expiry date has passed are marked `expired`. The
//! respond endpoint applies the same rule when a student answers late, so
//! this job only keeps listings accurate between responses.

use std::time::Duration;

use chrono::Utc;
use placement_db::repositories::OfferRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the offer expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Offer expiry job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Offer expiry job stopping");
                break;
            }
            _ = ticker.tick() => {
                let today = Utc::now().date_naive();
                match OfferRepo::expire_overdue(&pool, today).await {
                    Ok(0) => tracing::debug!("Offer expiry: nothing to expire"),
                    Ok(expired) => tracing::info!(expired, "Offer expiry: marked offers expired"),
                    Err(e) => tracing::error!(error = %e, "Offer expiry: update failed"),
                }
            }
        }
    }
}
