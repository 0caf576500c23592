use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::models::roadmap::{RoadmapStep, TaskKind};
use crate::readiness::milestones::{
    day_progress, global_progress, mark_completed_steps, toggle_full_day, toggle_task,
    ROADMAP_DAYS,
};
use crate::readiness::refresh_scores;
use crate::readiness::scoring::ScoreBreakdown;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RoadmapResponse {
    pub role: String,
    pub steps: Vec<RoadmapStep>,
    pub global_progress: u32,
    pub cached: bool,
}

#[derive(Deserialize)]
pub struct TaskToggleRequest {
    pub day: u32,
    pub task: TaskKind,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    pub day: u32,
    pub day_progress: f64,
    pub completed_resources: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

fn check_day(day: u32) -> Result<(), AppError> {
    if (1..=ROADMAP_DAYS).contains(&day) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "day must be between 1 and {ROADMAP_DAYS}, got {day}"
        )))
    }
}

/// Cached roadmap for the profile's role, generating (and caching) one on a miss.
async fn load_roadmap(
    state: &AppState,
    profile: &UserProfile,
) -> Result<(Vec<RoadmapStep>, bool), AppError> {
    if let Some(steps) = state.roadmap_cache.get(&profile.target_role).await {
        return Ok((steps, true));
    }

    let steps = state
        .analysis
        .generate_roadmap(&profile.current_skills, &profile.target_role)
        .await?;
    state.roadmap_cache.put(&profile.target_role, &steps).await;
    info!(role = %profile.target_role, days = steps.len(), "Roadmap generated");
    Ok((steps, false))
}

/// GET /api/v1/profiles/:id/roadmap
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let profile = state.profiles.get(id).await?;
    let (mut steps, cached) = load_roadmap(&state, &profile).await?;

    mark_completed_steps(&mut steps, &profile.completed_resources);
    let progress = global_progress(&profile.completed_resources, steps.len());

    Ok(Json(RoadmapResponse {
        role: profile.target_role,
        steps,
        global_progress: progress,
        cached,
    }))
}

/// POST /api/v1/profiles/:id/roadmap/steps/:day/regenerate
pub async fn handle_regenerate_step(
    State(state): State<AppState>,
    Path((id, day)): Path<(Uuid, u32)>,
) -> Result<Json<RoadmapStep>, AppError> {
    check_day(day)?;
    let profile = state.profiles.get(id).await?;
    let (mut steps, _) = load_roadmap(&state, &profile).await?;

    let slot = steps
        .iter()
        .position(|s| s.day == day)
        .ok_or_else(|| AppError::NotFound(format!("Roadmap has no day {day}")))?;

    let mut regenerated = state
        .analysis
        .regenerate_step(&steps[slot], &profile.target_role)
        .await?;
    regenerated.day = day;
    steps[slot] = regenerated.clone();
    state.roadmap_cache.put(&profile.target_role, &steps).await;

    mark_completed_steps(std::slice::from_mut(&mut regenerated), &profile.completed_resources);
    Ok(Json(regenerated))
}

/// POST /api/v1/profiles/:id/roadmap/tasks
pub async fn handle_toggle_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TaskToggleRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    check_day(req.day)?;
    let today = Utc::now().date_naive();
    let (profile, breakdown) = state
        .profiles
        .mutate(id, |p| {
            toggle_task(&mut p.completed_resources, req.day, req.task);
            Ok(refresh_scores(p, today))
        })
        .await?;

    Ok(Json(ProgressResponse {
        day: req.day,
        day_progress: day_progress(&profile.completed_resources, req.day),
        completed_resources: profile.completed_resources,
        breakdown,
    }))
}

/// POST /api/v1/profiles/:id/roadmap/days/:day
pub async fn handle_toggle_day(
    State(state): State<AppState>,
    Path((id, day)): Path<(Uuid, u32)>,
) -> Result<Json<ProgressResponse>, AppError> {
    check_day(day)?;
    let today = Utc::now().date_naive();
    let (profile, breakdown) = state
        .profiles
        .mutate(id, |p| {
            toggle_full_day(&mut p.completed_resources, day);
            Ok(refresh_scores(p, today))
        })
        .await?;

    Ok(Json(ProgressResponse {
        day,
        day_progress: day_progress(&profile.completed_resources, day),
        completed_resources: profile.completed_resources,
        breakdown,
    }))
}
