//! Placement sessions (recruitment seasons such as "2025-26").

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Validate the fields of a new placement session.
pub fn validate_session(name: &str, start: Date, end: Date) -> Result<(), CoreError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Session name is required".to_string());
    }
    if end < start {
        errors.push("Session end date must not be before its start date".to_string());
    }
    CoreError::from_messages(errors)
}

/// DTO for `POST /placement-session/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn session_dates_must_be_ordered() {
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        assert!(validate_session("2025-26", start, end).is_ok());
        assert!(validate_session("2025-26", end, start).is_err());
        assert!(validate_session(" ", start, end).is_err());
    }
}
