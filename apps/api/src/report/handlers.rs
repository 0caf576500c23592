use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::readiness::evaluate_profile;
use crate::report::{export_report, render_report_md};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReportResponse {
    pub s3_key: String,
    pub markdown: String,
}

/// POST /api/v1/profiles/:id/report
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReportResponse>, AppError> {
    let profile = state.profiles.get(id).await?;
    let report = evaluate_profile(&profile);
    let generated_at = Utc::now();
    let markdown = render_report_md(&profile, &report, generated_at);

    let s3_key = export_report(
        &state.s3,
        &state.config.s3_bucket,
        id,
        markdown.clone(),
        generated_at,
    )
    .await?;

    Ok(Json(ReportResponse { s3_key, markdown }))
}
