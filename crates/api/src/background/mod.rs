//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks accept a [`CancellationToken`]
//! for graceful shutdown. The outbox dispatcher lives in
//! `placement_events`.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod offer_expiry;
