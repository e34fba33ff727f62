//! Shared query parameter types for API handlers.

use placement_core::jnf::JnfStatus;
use serde::Deserialize;

/// Query parameters for `GET /jnf/all`.
#[derive(Debug, Default, Deserialize)]
pub struct JnfListParams {
    pub status: Option<JnfStatus>,
}
