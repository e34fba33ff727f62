//! Job Notification Forms.

use placement_core::jnf::{JnfDraft, JnfStatus, ReviewJnf};
use placement_core::types::DbId;
use serde::Serialize;
use serde_json::json;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::Jnf;
use crate::services::StepResult;

#[derive(Serialize)]
struct StatusQuery {
    status: Option<JnfStatus>,
}

/// Service for `/jnf`.
#[derive(Debug, Clone)]
pub struct JnfService {
    api: ApiClient,
}

impl JnfService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn submit_jnf(&self, jnf: &JnfDraft) -> Result<Jnf, ClientError> {
        self.api.post("/jnf/submit", jnf, "submit JNF").await
    }

    pub async fn validate_step(&self, step: u8, jnf: &JnfDraft) -> Result<StepResult, ClientError> {
        self.api
            .post(
                "/jnf/validate-step",
                &json!({ "step": step, "jnf": jnf }),
                "validate step",
            )
            .await
    }

    pub async fn get_all_jnfs(&self, status: Option<JnfStatus>) -> Result<Vec<Jnf>, ClientError> {
        self.api
            .get_with_query("/jnf/all", &StatusQuery { status }, "fetch JNFs")
            .await
    }

    pub async fn get_jnf(&self, jnf_id: DbId) -> Result<Jnf, ClientError> {
        self.api.get(&format!("/jnf/{jnf_id}"), "fetch JNF").await
    }

    pub async fn review_jnf(&self, jnf_id: DbId, status: JnfStatus) -> Result<Jnf, ClientError> {
        self.api
            .put(
                &format!("/jnf/{jnf_id}/status"),
                &ReviewJnf { status },
                "review JNF",
            )
            .await
    }
}
