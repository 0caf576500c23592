use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::github::fetch_public_repos;
use crate::analysis::provider::EvidenceAnalysis;
use crate::analysis::validation::validate_resume_text;
use crate::errors::AppError;
use crate::models::market::RepoSummary;
use crate::models::profile::UserProfile;
use crate::profiles::mutations::{
    apply_evidence, complete_onboarding, track_application, OnboardingInput,
};
use crate::readiness::scoring::ScoreBreakdown;
use crate::state::AppState;

const RESUME_UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub profile: UserProfile,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub profile: UserProfile,
    pub breakdown: ScoreBreakdown,
    pub extracted_skills: usize,
    pub extracted_projects: usize,
    /// Seniority label, resume syncs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_level: Option<String>,
}

#[derive(Deserialize)]
pub struct TextSyncRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct GitHubSyncRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub repos: Option<Vec<RepoSummary>>,
}

#[derive(Deserialize)]
pub struct ApplicationRequest {
    pub job_id: String,
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub profile: UserProfile,
    /// `false` when the job was already tracked.
    pub added: bool,
}

/// POST /api/v1/profiles
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let (id, profile) = state.profiles.create(&req.name, &req.email).await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse { id, profile })))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profiles.get(id).await?;
    Ok(Json(ProfileResponse { id, profile }))
}

/// DELETE /api/v1/profiles/:id
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.profiles.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/profiles/:id/onboarding
pub async fn handle_onboarding(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<OnboardingInput>,
) -> Result<Json<ProfileResponse>, AppError> {
    let today = Utc::now().date_naive();
    let (profile, _) = state
        .profiles
        .mutate(id, |p| complete_onboarding(p, input, today))
        .await?;
    info!(profile_id = %id, role = %profile.target_role, "Onboarding complete");
    Ok(Json(ProfileResponse { id, profile }))
}

// ────────────────────────────────────────────────────────────────────────────
// Evidence sync
// ────────────────────────────────────────────────────────────────────────────

/// Merges analysed evidence under the profile lock. The provider call has
/// already happened, so a failed analysis never touches the profile.
async fn merge_synced_evidence(
    state: &AppState,
    id: Uuid,
    evidence: EvidenceAnalysis,
    detected_level: Option<String>,
    github_user: Option<String>,
) -> Result<SyncResponse, AppError> {
    let extracted_skills = evidence.skills.len();
    let extracted_projects = evidence.projects.len();
    let today = Utc::now().date_naive();

    let (profile, breakdown) = state
        .profiles
        .mutate(id, move |p| {
            if let Some(user) = github_user {
                p.github_user = Some(user);
            }
            Ok(apply_evidence(p, evidence, today))
        })
        .await?;

    info!(
        profile_id = %id,
        extracted_skills,
        extracted_projects,
        readiness = breakdown.total,
        "Evidence merged"
    );

    Ok(SyncResponse {
        profile,
        breakdown,
        extracted_skills,
        extracted_projects,
        detected_level,
    })
}

async fn sync_resume_text(state: &AppState, id: Uuid, text: &str) -> Result<SyncResponse, AppError> {
    validate_resume_text(text)?;
    // Fail fast on an unknown profile before spending a provider call.
    state.profiles.get(id).await?;

    let analysis = state.analysis.extract_skills_from_resume(text).await?;
    let level = analysis.level.clone();
    merge_synced_evidence(state, id, analysis.into(), Some(level), None).await
}

/// POST /api/v1/profiles/:id/sync/resume
pub async fn handle_sync_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextSyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    Ok(Json(sync_resume_text(&state, id, &req.text).await?))
}

/// POST /api/v1/profiles/:id/sync/resume/upload
///
/// Accepts a PDF in the multipart field `file`; text extraction runs on the
/// blocking pool.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SyncResponse>, AppError> {
    let mut pdf_bytes: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_UPLOAD_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
            pdf_bytes = Some(data);
            break;
        }
    }
    let pdf_bytes = pdf_bytes.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{RESUME_UPLOAD_FIELD}'"))
    })?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?
        .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?;

    Ok(Json(sync_resume_text(&state, id, &text).await?))
}

/// POST /api/v1/profiles/:id/sync/linkedin
pub async fn handle_sync_linkedin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TextSyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("LinkedIn profile text must not be empty".to_string()));
    }
    state.profiles.get(id).await?;

    let evidence = state.analysis.analyze_linkedin_profile(text).await?;
    Ok(Json(merge_synced_evidence(&state, id, evidence, None, None).await?))
}

/// POST /api/v1/profiles/:id/sync/github
///
/// Either a `username` (repositories are fetched from GitHub) or an explicit
/// `repos` list.
pub async fn handle_sync_github(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GitHubSyncRequest>,
) -> Result<Json<SyncResponse>, AppError> {
    state.profiles.get(id).await?;

    let (repos, github_user) = match (req.username, req.repos) {
        (Some(username), _) if !username.trim().is_empty() => {
            let repos =
                fetch_public_repos(&state.http, &state.config.github_api_url, &username).await?;
            (repos, Some(username.trim().to_string()))
        }
        (_, Some(repos)) if !repos.is_empty() => (repos, None),
        _ => {
            return Err(AppError::Validation(
                "Provide a GitHub username or a non-empty repository list".to_string(),
            ))
        }
    };

    let evidence = state.analysis.analyze_github_repos(&repos).await?;
    Ok(Json(
        merge_synced_evidence(&state, id, evidence, None, github_user).await?,
    ))
}

/// POST /api/v1/profiles/:id/applications
pub async fn handle_track_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplicationRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let now = Utc::now();
    let (profile, added) = state
        .profiles
        .mutate(id, |p| track_application(p, &req.job_id, now))
        .await?;
    Ok(Json(ApplicationResponse { profile, added }))
}
