//! Placement sessions.

use placement_core::session::CreateSession;
use placement_core::types::{Date, DbId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::PlacementSession;

/// Service for `/placement-session`.
#[derive(Debug, Clone)]
pub struct PlacementSessionService {
    api: ApiClient,
}

impl PlacementSessionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn create_session(
        &self,
        name: &str,
        start_date: Date,
        end_date: Date,
    ) -> Result<PlacementSession, ClientError> {
        let body = CreateSession {
            name: name.to_string(),
            start_date,
            end_date,
        };
        self.api
            .post("/placement-session/create", &body, "create placement session")
            .await
    }

    pub async fn get_all_sessions(&self) -> Result<Vec<PlacementSession>, ClientError> {
        self.api
            .get("/placement-session/all", "fetch placement sessions")
            .await
    }

    /// The active session, if any.
    pub async fn get_active_session(&self) -> Result<Option<PlacementSession>, ClientError> {
        self.api
            .get("/placement-session/active", "fetch active placement session")
            .await
    }

    pub async fn activate_session(&self, session_id: DbId) -> Result<PlacementSession, ClientError> {
        self.api
            .put(
                &format!("/placement-session/{session_id}/activate"),
                &serde_json::json!({}),
                "activate placement session",
            )
            .await
    }
}
