//! Row models and request/response DTOs.

pub mod application;
pub mod drive;
pub mod jnf;
pub mod notification;
pub mod offer;
pub mod outbox;
pub mod round;
pub mod session;
pub mod student;
