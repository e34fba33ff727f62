//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that must emit an outbox
//! event open their own transaction and record the event through
//! [`OutboxRepo::insert`] before committing.

pub mod application_repo;
pub mod drive_repo;
pub mod jnf_repo;
pub mod notification_repo;
pub mod offer_repo;
pub mod outbox_repo;
pub mod round_repo;
pub mod session_repo;
pub mod student_repo;

pub use application_repo::ApplicationRepo;
pub use drive_repo::DriveRepo;
pub use jnf_repo::JnfRepo;
pub use notification_repo::NotificationRepo;
pub use offer_repo::OfferRepo;
pub use outbox_repo::OutboxRepo;
pub use round_repo::RoundRepo;
pub use session_repo::SessionRepo;
pub use student_repo::StudentRepo;
