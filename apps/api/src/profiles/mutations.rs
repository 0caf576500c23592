//! Pure profile mutations. Each one ends with a score refresh so the cached
//! readiness numbers and today's history point never go stale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::analysis::provider::EvidenceAnalysis;
use crate::errors::AppError;
use crate::models::profile::{ApplicationRecord, ApplicationStatus, Project, UserProfile};
use crate::models::skill::Skill;
use crate::readiness::reconcile::merge_evidence;
use crate::readiness::refresh_scores;
use crate::readiness::scoring::ScoreBreakdown;

#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingInput {
    pub target_role: String,
    #[serde(default)]
    pub github_user: Option<String>,
    #[serde(default)]
    pub linkedin_user: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Merges newly extracted evidence into the profile.
pub fn apply_evidence(
    profile: &mut UserProfile,
    evidence: EvidenceAnalysis,
    today: NaiveDate,
) -> ScoreBreakdown {
    let (skills, projects) = merge_evidence(
        std::mem::take(&mut profile.current_skills),
        evidence.skills,
        std::mem::take(&mut profile.projects),
        evidence.projects,
    );
    profile.current_skills = skills;
    profile.projects = projects;
    refresh_scores(profile, today)
}

pub fn complete_onboarding(
    profile: &mut UserProfile,
    input: OnboardingInput,
    today: NaiveDate,
) -> Result<ScoreBreakdown, AppError> {
    let target_role = input.target_role.trim();
    if target_role.is_empty() {
        return Err(AppError::Validation("target_role must not be empty".to_string()));
    }

    profile.target_role = target_role.to_string();
    if let Some(github) = non_blank(input.github_user) {
        profile.github_user = Some(github);
    }
    if let Some(linkedin) = non_blank(input.linkedin_user) {
        profile.linkedin_user = Some(linkedin);
    }
    profile.onboarding_complete = true;

    Ok(apply_evidence(
        profile,
        EvidenceAnalysis {
            skills: input.skills,
            projects: input.projects,
        },
        today,
    ))
}

/// Records an application. Returns `false` when the job was already tracked.
pub fn track_application(
    profile: &mut UserProfile,
    job_id: &str,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        return Err(AppError::Validation("job_id must not be empty".to_string()));
    }

    let already_tracked = profile.applications.iter().any(|a| a.job_id == job_id);
    if !already_tracked {
        profile.applications.push(ApplicationRecord {
            job_id: job_id.to_string(),
            status: ApplicationStatus::Applied,
            applied_date: now,
        });
    }
    refresh_scores(profile, now.date_naive());
    Ok(!already_tracked)
}
