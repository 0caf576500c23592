use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::skill::JobRole;
use crate::readiness::roles::job_roles;
use crate::readiness::{evaluate_profile, ReadinessReport};
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn handle_list_roles() -> Json<&'static [JobRole]> {
    Json(job_roles())
}

/// GET /api/v1/profiles/:id/readiness
pub async fn handle_get_readiness(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReadinessReport>, AppError> {
    let profile = state.profiles.get(id).await?;
    Ok(Json(evaluate_profile(&profile)))
}
