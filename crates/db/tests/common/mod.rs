#![allow(dead_code)]

use placement_core::drive::{
    ApplicationDetails, BranchEntry, CompanyDetails, EligibilityCriteria, EligibleBranches,
    JobProfile, PlacementDriveDraft,
};
use placement_core::student::{Academics, PersonalInfo, RegisterStudent};
use placement_db::models::drive::PlacementDrive;
use placement_db::models::round::{CreateRound, PlacementRound};
use placement_db::models::student::Student;
use placement_db::repositories::{DriveRepo, RoundRepo, StudentRepo};
use sqlx::PgPool;

pub fn drive_draft(title: &str) -> PlacementDriveDraft {
    PlacementDriveDraft {
        placement_drive_title: title.to_string(),
        company_details: CompanyDetails {
            name: "Acme".into(),
            email: "hr@acme.com".into(),
            ..Default::default()
        },
        job_profiles: vec![JobProfile {
            profile_id: "profile-1".into(),
            designation: "SDE".into(),
            eligible_branches: EligibleBranches {
                btech: vec![BranchEntry {
                    name: "CSE".into(),
                    specialization: None,
                    eligible: true,
                }],
                ..Default::default()
            },
            ..Default::default()
        }],
        eligibility_criteria: EligibilityCriteria {
            min_cgpa: Some(6.0),
            backlog_allowed: false,
            other_eligibility: String::new(),
        },
        application_details: ApplicationDetails {
            application_deadline: None,
            application_link: String::new(),
        },
        ..Default::default()
    }
}

pub async fn create_drive(pool: &PgPool) -> PlacementDrive {
    DriveRepo::create(pool, &drive_draft("Acme Campus Drive"))
        .await
        .unwrap()
}

pub async fn create_round(pool: &PgPool, drive_id: i64, name: &str) -> PlacementRound {
    let input = CreateRound {
        round_name: name.to_string(),
        ..Default::default()
    };
    RoundRepo::create(pool, drive_id, &input)
        .await
        .unwrap()
        .expect("drive exists")
}

pub async fn register_student(pool: &PgPool, roll: &str) -> Student {
    let input = RegisterStudent {
        personal_info: PersonalInfo {
            name: format!("Student {roll}"),
            roll_number: roll.to_string(),
            email: format!("{}@college.edu", roll.to_lowercase()),
            department: "CSE".into(),
            batch: "2025".into(),
            ..Default::default()
        },
        academics: Academics {
            cgpa: 8.0,
            ..Default::default()
        },
    };
    StudentRepo::register(pool, &input).await.unwrap()
}
