//! Domain types and rules for the campus placement portal.
//!
//! Everything here is pure: no database or HTTP access. The repository and
//! API crates call into these modules to validate input and to decide state
//! transitions.

pub mod drive;
pub mod eligibility;
pub mod error;
pub mod jnf;
pub mod listing;
pub mod notification;
pub mod offer;
pub mod round;
pub mod selection;
pub mod session;
pub mod student;
pub mod types;
pub mod wizard;
