pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::profiles::handlers as profiles;
use crate::readiness::handlers as readiness;
use crate::report::handlers as report;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(readiness::handle_list_roles))
        // Profiles
        .route("/api/v1/profiles", post(profiles::handle_signup))
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handle_get_profile).delete(profiles::handle_delete_profile),
        )
        .route(
            "/api/v1/profiles/:id/onboarding",
            post(profiles::handle_onboarding),
        )
        .route(
            "/api/v1/profiles/:id/applications",
            post(profiles::handle_track_application),
        )
        // Evidence sync
        .route(
            "/api/v1/profiles/:id/sync/resume",
            post(profiles::handle_sync_resume),
        )
        .route(
            "/api/v1/profiles/:id/sync/resume/upload",
            post(profiles::handle_upload_resume),
        )
        .route(
            "/api/v1/profiles/:id/sync/linkedin",
            post(profiles::handle_sync_linkedin),
        )
        .route(
            "/api/v1/profiles/:id/sync/github",
            post(profiles::handle_sync_github),
        )
        // Readiness and roadmap
        .route(
            "/api/v1/profiles/:id/readiness",
            get(readiness::handle_get_readiness),
        )
        .route(
            "/api/v1/profiles/:id/roadmap",
            get(roadmap::handle_get_roadmap),
        )
        .route(
            "/api/v1/profiles/:id/roadmap/steps/:day/regenerate",
            post(roadmap::handle_regenerate_step),
        )
        .route(
            "/api/v1/profiles/:id/roadmap/tasks",
            post(roadmap::handle_toggle_task),
        )
        .route(
            "/api/v1/profiles/:id/roadmap/days/:day",
            post(roadmap::handle_toggle_day),
        )
        // Guidance
        .route("/api/v1/profiles/:id/mentor", post(analysis::handle_mentor))
        .route(
            "/api/v1/profiles/:id/report",
            post(report::handle_export_report),
        )
        .route("/api/v1/market-pulse", get(analysis::handle_market_pulse))
        .route("/api/v1/cover-letter", post(analysis::handle_cover_letter))
        .route("/api/v1/strategy", post(analysis::handle_strategy))
        .with_state(state)
}
