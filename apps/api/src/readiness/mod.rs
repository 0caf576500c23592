// Readiness engine: scoring, gap analysis, evidence reconciliation and roadmap
// completion. Everything here is pure; handlers.rs is the only HTTP surface.

pub mod gaps;
pub mod handlers;
pub mod milestones;
pub mod reconcile;
pub mod roles;
pub mod scoring;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::profile::{ScorePoint, UserProfile};
use crate::models::skill::JobRole;
use crate::readiness::gaps::{analyze_gaps, top_priority_gap, GapAnalysis};
use crate::readiness::milestones::{count_completed_tasks, TOTAL_ROADMAP_TASKS};
use crate::readiness::roles::find_role;
use crate::readiness::scoring::{calculate_readiness_score, ScoreBreakdown};

/// Everything the dashboard renders for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub role: JobRole,
    pub breakdown: ScoreBreakdown,
    pub gaps: Vec<GapAnalysis>,
    pub top_recommendation: Option<GapAnalysis>,
    pub completed_tasks: u32,
    pub total_tasks: u32,
}

/// Scores a profile against its target role.
pub fn evaluate_profile(profile: &UserProfile) -> ReadinessReport {
    let role = find_role(&profile.target_role);
    let completed_tasks = count_completed_tasks(&profile.completed_resources);

    let breakdown = calculate_readiness_score(
        &profile.current_skills,
        &role.requirements,
        completed_tasks,
        TOTAL_ROADMAP_TASKS,
    );
    let gaps = analyze_gaps(&role.requirements, &profile.current_skills);
    let top_recommendation = top_priority_gap(&gaps).cloned();

    ReadinessReport {
        role: role.clone(),
        breakdown,
        gaps,
        top_recommendation,
        completed_tasks,
        total_tasks: TOTAL_ROADMAP_TASKS,
    }
}

/// Recomputes the cached scores on the profile and records today's score.
pub fn refresh_scores(profile: &mut UserProfile, today: NaiveDate) -> ScoreBreakdown {
    let breakdown = evaluate_profile(profile).breakdown;
    profile.readiness_score = breakdown.total;
    profile.interview_readiness = breakdown.interview_readiness;

    match profile.history.last_mut() {
        Some(point) if point.date == today => point.score = breakdown.total,
        _ => profile.history.push(ScorePoint {
            date: today,
            score: breakdown.total,
        }),
    }

    breakdown
}
