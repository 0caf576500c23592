use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::skill::Skill;

/// Target role assigned to new profiles until onboarding picks one.
pub const DEFAULT_TARGET_ROLE: &str = "Frontend Developer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectSource {
    GitHub,
    Manual,
    LinkedIn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque, generated when the project is first extracted or when a
    /// client submits one without an id.
    #[serde(default = "generate_project_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub source: ProjectSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tech_stack: Vec<String>,
        source: ProjectSource,
    ) -> Self {
        Self {
            id: generate_project_id(),
            name: name.into(),
            description: description.into(),
            url: None,
            tech_stack,
            source,
            stars: None,
        }
    }
}

pub fn generate_project_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Rejected,
    Offer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_id: String,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: u32,
}

/// Aggregate root for one user session. Mutated only through
/// `ProfileRepository::mutate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub target_role: String,
    #[serde(default)]
    pub current_skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub readiness_score: u32,
    pub interview_readiness: u32,
    pub streak: u32,
    #[serde(default)]
    pub history: Vec<ScorePoint>,
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_user: Option<String>,
    /// Roadmap completion tokens, `day-<N>-<learn|practice|build|review>`.
    #[serde(default)]
    pub completed_resources: Vec<String>,
    #[serde(default)]
    pub onboarding_complete: bool,
}

impl UserProfile {
    /// Profile created at sign-up, before onboarding.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            target_role: DEFAULT_TARGET_ROLE.to_string(),
            current_skills: Vec::new(),
            projects: Vec::new(),
            readiness_score: 0,
            interview_readiness: 0,
            streak: 1,
            history: Vec::new(),
            applications: Vec::new(),
            github_user: None,
            linkedin_user: None,
            completed_resources: Vec::new(),
            onboarding_complete: false,
        }
    }

    /// One-line summary handed to the mentor prompt.
    pub fn summary(&self) -> String {
        let skills: Vec<&str> = self.current_skills.iter().map(|s| s.name.as_str()).collect();
        format!(
            "Name: {}, Role: {}, Readiness: {}%, Skills: {}",
            self.name,
            self.target_role,
            self.readiness_score,
            skills.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub schema_version: i32,
    pub snapshot: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
