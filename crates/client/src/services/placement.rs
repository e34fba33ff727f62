//! Placement drives, rounds, applications, notifications and offers.

use placement_core::drive::{
    CreateDriveFromJnf, DriveFilter, DriveStatus, PlacementDriveDraft, UpdateDriveStatus,
};
use placement_core::notification::CreateNotification;
use placement_core::offer::{CreateOfferLetter, RespondToOffer};
use placement_core::round::{
    CreateRound, DeclareResults, RoundTransitionRequest, UpdateCohort, UpdateRound,
};
use placement_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{
    DetailedResults, DriveApplication, Notification, OfferLetter, OutboxEvent, PlacementDrive,
    PlacementRound, RoundDetails, StudentSummary,
};

/// Outcome of validating one wizard step on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: u8,
    pub label: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Service for `/placement`.
#[derive(Debug, Clone)]
pub struct PlacementService {
    api: ApiClient,
}

impl PlacementService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn round_path(drive_id: DbId, round_id: DbId) -> String {
        format!("/placement/{drive_id}/rounds/{round_id}")
    }

    // ---- drives ----

    pub async fn create_placement_drive(
        &self,
        draft: &PlacementDriveDraft,
    ) -> Result<PlacementDrive, ClientError> {
        self.api
            .post("/placement/create-placement-drive", draft, "create placement drive")
            .await
    }

    /// Create a drive from an approved JNF. A `None` title defaults to
    /// "<company> Placement Drive".
    pub async fn create_from_jnf(
        &self,
        jnf_id: DbId,
        title: Option<String>,
        session_id: Option<DbId>,
    ) -> Result<PlacementDrive, ClientError> {
        let body = CreateDriveFromJnf {
            placement_drive_title: title,
            session_id,
        };
        self.api
            .post(
                &format!("/placement/create-from-jnf/{jnf_id}"),
                &body,
                "create placement drive from JNF",
            )
            .await
    }

    pub async fn validate_step(
        &self,
        step: u8,
        draft: &PlacementDriveDraft,
    ) -> Result<StepResult, ClientError> {
        self.api
            .post(
                "/placement/validate-step",
                &json!({ "step": step, "draft": draft }),
                "validate step",
            )
            .await
    }

    pub async fn get_all_placements(
        &self,
        filter: &DriveFilter,
    ) -> Result<Vec<PlacementDrive>, ClientError> {
        self.api
            .get_with_query("/placement/all", filter, "fetch placements")
            .await
    }

    pub async fn get_placement(&self, drive_id: DbId) -> Result<PlacementDrive, ClientError> {
        self.api
            .get(&format!("/placement/{drive_id}/getone"), "fetch placement")
            .await
    }

    pub async fn update_status(
        &self,
        drive_id: DbId,
        status: DriveStatus,
    ) -> Result<PlacementDrive, ClientError> {
        self.api
            .put(
                &format!("/placement/{drive_id}/update-status"),
                &UpdateDriveStatus { status },
                "update placement status",
            )
            .await
    }

    // ---- applications ----

    pub async fn apply(
        &self,
        drive_id: DbId,
        student_id: DbId,
    ) -> Result<DriveApplication, ClientError> {
        self.api
            .post(
                &format!("/placement/{drive_id}/apply/{student_id}"),
                &json!({}),
                "apply to placement",
            )
            .await
    }

    pub async fn get_applications(
        &self,
        drive_id: DbId,
    ) -> Result<Vec<DriveApplication>, ClientError> {
        self.api
            .get(&format!("/placement/{drive_id}/applications"), "fetch applications")
            .await
    }

    // ---- rounds ----

    pub async fn get_round_details(&self, drive_id: DbId) -> Result<RoundDetails, ClientError> {
        self.api
            .get(&format!("/placement/{drive_id}/rounds/all"), "fetch round details")
            .await
    }

    pub async fn add_round(
        &self,
        drive_id: DbId,
        round: &CreateRound,
    ) -> Result<PlacementRound, ClientError> {
        self.api
            .post(&format!("/placement/{drive_id}/add-round"), round, "add round")
            .await
    }

    /// Overwrite every editable field of a round. `round.version` must be
    /// the version last read; a stale one fails with 409.
    pub async fn update_round(
        &self,
        drive_id: DbId,
        round_id: DbId,
        round: &UpdateRound,
    ) -> Result<PlacementRound, ClientError> {
        self.api
            .put(
                &format!("{}/update-round", Self::round_path(drive_id, round_id)),
                round,
                "update round",
            )
            .await
    }

    pub async fn start_round(
        &self,
        drive_id: DbId,
        round_id: DbId,
        version: Option<i32>,
    ) -> Result<PlacementRound, ClientError> {
        self.api
            .post(
                &format!("{}/start", Self::round_path(drive_id, round_id)),
                &RoundTransitionRequest { version },
                "start round",
            )
            .await
    }

    pub async fn complete_round(
        &self,
        drive_id: DbId,
        round_id: DbId,
        version: Option<i32>,
    ) -> Result<PlacementRound, ClientError> {
        self.api
            .post(
                &format!("{}/complete", Self::round_path(drive_id, round_id)),
                &RoundTransitionRequest { version },
                "complete round",
            )
            .await
    }

    pub async fn get_applicant_students(
        &self,
        drive_id: DbId,
        round_id: DbId,
    ) -> Result<Vec<StudentSummary>, ClientError> {
        self.api
            .get(
                &format!("{}/applicant-students", Self::round_path(drive_id, round_id)),
                "fetch applicant students",
            )
            .await
    }

    pub async fn get_appeared_students(
        &self,
        drive_id: DbId,
        round_id: DbId,
    ) -> Result<Vec<StudentSummary>, ClientError> {
        self.api
            .get(
                &format!("{}/appeared-students", Self::round_path(drive_id, round_id)),
                "fetch appeared students",
            )
            .await
    }

    pub async fn get_selected_students(
        &self,
        drive_id: DbId,
        round_id: DbId,
    ) -> Result<Vec<StudentSummary>, ClientError> {
        self.api
            .get(
                &format!("{}/selected-students", Self::round_path(drive_id, round_id)),
                "fetch selected students",
            )
            .await
    }

    /// Replace the appeared cohort with `student_ids`.
    pub async fn update_appeared_students(
        &self,
        drive_id: DbId,
        round_id: DbId,
        student_ids: &[DbId],
        version: Option<i32>,
    ) -> Result<PlacementRound, ClientError> {
        let body = UpdateCohort {
            student_ids: student_ids.to_vec(),
            version,
        };
        self.api
            .put(
                &format!("{}/update-appeared-students", Self::round_path(drive_id, round_id)),
                &body,
                "update appeared students",
            )
            .await
    }

    /// Replace the selected cohort with `student_ids`.
    pub async fn update_selected_students(
        &self,
        drive_id: DbId,
        round_id: DbId,
        student_ids: &[DbId],
        version: Option<i32>,
    ) -> Result<PlacementRound, ClientError> {
        let body = UpdateCohort {
            student_ids: student_ids.to_vec(),
            version,
        };
        self.api
            .put(
                &format!("{}/update-selected-students", Self::round_path(drive_id, round_id)),
                &body,
                "update selected students",
            )
            .await
    }

    pub async fn declare_results(
        &self,
        drive_id: DbId,
        round_id: DbId,
        result_message: &str,
        result_description: &str,
    ) -> Result<PlacementRound, ClientError> {
        let body = DeclareResults {
            result_message: result_message.to_string(),
            result_description: result_description.to_string(),
            version: None,
        };
        self.api
            .put(
                &format!("{}/declare-results", Self::round_path(drive_id, round_id)),
                &body,
                "declare results",
            )
            .await
    }

    pub async fn get_detailed_results(
        &self,
        drive_id: DbId,
        round_id: DbId,
    ) -> Result<DetailedResults, ClientError> {
        self.api
            .get(
                &format!("{}/detailed-results", Self::round_path(drive_id, round_id)),
                "fetch detailed results",
            )
            .await
    }

    // ---- notifications ----

    pub async fn add_notification(
        &self,
        drive_id: DbId,
        notification: &CreateNotification,
    ) -> Result<Notification, ClientError> {
        self.api
            .post(
                &format!("/placement/{drive_id}/notifications/add-new"),
                notification,
                "create notification",
            )
            .await
    }

    pub async fn get_notifications(&self, drive_id: DbId) -> Result<Vec<Notification>, ClientError> {
        self.api
            .get(
                &format!("/placement/{drive_id}/notifications/all"),
                "fetch notifications",
            )
            .await
    }

    pub async fn delete_notification(
        &self,
        drive_id: DbId,
        notification_id: DbId,
    ) -> Result<(), ClientError> {
        self.api
            .delete(
                &format!("/placement/{drive_id}/notifications/{notification_id}/delete"),
                "delete notification",
            )
            .await
    }

    pub async fn get_outbox(&self, drive_id: DbId) -> Result<Vec<OutboxEvent>, ClientError> {
        self.api
            .get(
                &format!("/placement/{drive_id}/notifications/outbox"),
                "fetch notification outbox",
            )
            .await
    }

    pub async fn retry_outbox_event(&self, event_id: DbId) -> Result<OutboxEvent, ClientError> {
        self.api
            .post(
                &format!("/notifications/outbox/{event_id}/retry"),
                &json!({}),
                "retry outbox event",
            )
            .await
    }

    // ---- offer letters ----

    pub async fn get_offer_letters(&self, drive_id: DbId) -> Result<Vec<OfferLetter>, ClientError> {
        self.api
            .get(&format!("/placement/{drive_id}/offer-letters"), "fetch offer letters")
            .await
    }

    pub async fn send_offer_letter(
        &self,
        drive_id: DbId,
        offer: &CreateOfferLetter,
    ) -> Result<OfferLetter, ClientError> {
        self.api
            .post(
                &format!("/placement/{drive_id}/offer-letters"),
                offer,
                "send offer letter",
            )
            .await
    }

    pub async fn respond_to_offer(
        &self,
        drive_id: DbId,
        offer_id: DbId,
        accept: bool,
    ) -> Result<OfferLetter, ClientError> {
        self.api
            .put(
                &format!("/placement/{drive_id}/offer-letters/{offer_id}/respond"),
                &RespondToOffer { accept },
                "respond to offer",
            )
            .await
    }
}
