use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::market::{ChatMessage, MarketPulse};
use crate::models::profile::DEFAULT_TARGET_ROLE;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MarketPulseQuery {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub resume_summary: String,
    pub job_title: String,
    pub company_name: String,
}

#[derive(Deserialize)]
pub struct StrategyRequest {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub user_skills: Vec<String>,
}

#[derive(Deserialize)]
pub struct MentorRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AppError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(value)
    }
}

/// GET /api/v1/market-pulse?role=&location=
pub async fn handle_market_pulse(
    State(state): State<AppState>,
    Query(params): Query<MarketPulseQuery>,
) -> Result<Json<MarketPulse>, AppError> {
    let role = params
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_TARGET_ROLE);
    let location = params.location.as_deref().map(str::trim).filter(|l| !l.is_empty());

    let pulse = state.analysis.fetch_live_market_pulse(role, location).await?;
    Ok(Json(pulse))
}

/// POST /api/v1/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(req): Json<CoverLetterRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let title = required(&req.job_title, "job_title")?;
    let company = required(&req.company_name, "company_name")?;
    let text = state
        .analysis
        .generate_cover_letter(req.resume_summary.trim(), title, company)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/strategy
pub async fn handle_strategy(
    State(state): State<AppState>,
    Json(req): Json<StrategyRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let title = required(&req.job_title, "job_title")?;
    let company = required(&req.company, "company")?;
    let text = state
        .analysis
        .get_winning_strategy(title, company, &req.user_skills)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/v1/profiles/:id/mentor
pub async fn handle_mentor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MentorRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let profile = state.profiles.get(id).await?;
    let text = state
        .analysis
        .get_mentor_advice(&req.history, &profile.summary())
        .await?;
    Ok(Json(TextResponse { text }))
}
