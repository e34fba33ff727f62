//! Student records and debour.

use placement_core::student::{DebourRequest, RegisterStudent, RevokeDebourRequest, StudentFilter};
use placement_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{DebourStatus, Student};

/// Service for `/student`.
#[derive(Debug, Clone)]
pub struct StudentService {
    api: ApiClient,
}

impl StudentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, ClientError> {
        self.api
            .get_with_query("/student/getallstudent", filter, "fetch students")
            .await
    }

    pub async fn get_student_profile(&self, student_id: DbId) -> Result<Student, ClientError> {
        self.api
            .get(&format!("/student/profile/{student_id}"), "fetch student profile")
            .await
    }

    pub async fn register_student_by_admin(
        &self,
        input: &RegisterStudent,
    ) -> Result<Student, ClientError> {
        self.api
            .post("/student/register/admin", input, "register student")
            .await
    }

    pub async fn debour_student(
        &self,
        student_id: DbId,
        reason: &str,
    ) -> Result<DebourStatus, ClientError> {
        let body = DebourRequest {
            reason: reason.to_string(),
        };
        self.api
            .post(&format!("/student/debour/{student_id}"), &body, "debour student")
            .await
    }

    pub async fn revoke_debour(
        &self,
        student_id: DbId,
        reason: Option<&str>,
    ) -> Result<DebourStatus, ClientError> {
        let body = RevokeDebourRequest {
            reason: reason.map(str::to_string),
        };
        self.api
            .post(
                &format!("/student/revoke-debour/{student_id}"),
                &body,
                "revoke debour",
            )
            .await
    }

    pub async fn check_debour_status(&self, student_id: DbId) -> Result<DebourStatus, ClientError> {
        self.api
            .get(
                &format!("/student/debour-status/{student_id}"),
                "check debour status",
            )
            .await
    }
}
