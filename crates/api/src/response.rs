//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of validating one wizard step.
#[derive(Debug, Serialize)]
pub struct StepValidation {
    pub step: u8,
    pub label: &'static str,
    pub valid: bool,
    pub errors: Vec<String>,
}
