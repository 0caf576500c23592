//! Readiness report: markdown rendering and S3 export.

pub mod handlers;

use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::models::skill::{Priority, ProficiencyLevel};
use crate::readiness::gaps::GapStatus;
use crate::readiness::ReadinessReport;

fn level_label(level: ProficiencyLevel) -> &'static str {
    match level {
        ProficiencyLevel::Basic => "Basic",
        ProficiencyLevel::Intermediate => "Intermediate",
        ProficiencyLevel::Advanced => "Advanced",
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "Critical",
        Priority::Important => "Important",
        Priority::NiceToHave => "Nice to have",
    }
}

fn status_label(status: GapStatus) -> &'static str {
    match status {
        GapStatus::Strong => "Strong",
        GapStatus::Partial => "Partial",
        GapStatus::Missing => "Missing",
    }
}

pub fn render_report_md(
    profile: &UserProfile,
    report: &ReadinessReport,
    generated_at: DateTime<Utc>,
) -> String {
    let b = &report.breakdown;
    let mut md = format!("# Readiness Report: {}\n\n", profile.name);
    md.push_str(&format!("- **Target role:** {}\n", report.role.title));
    md.push_str(&format!("- **Generated:** {}\n", generated_at.format("%Y-%m-%d %H:%M UTC")));
    md.push_str(&format!("- **Readiness:** {}%\n", b.total));
    md.push_str(&format!("- **Interview readiness:** {}%\n\n", b.interview_readiness));

    md.push_str("## Score Breakdown\n\n");
    md.push_str("| Component | Points |\n|---|---|\n");
    md.push_str(&format!("| Skill mastery | {} / 70 |\n", b.skill_points));
    md.push_str(&format!("| Evidence | {} / 20 |\n", b.evidence_points));
    md.push_str(&format!(
        "| Milestones ({} of {} tasks) | {} / 10 |\n\n",
        report.completed_tasks, report.total_tasks, b.milestone_points
    ));

    md.push_str("## Skill Gaps\n\n");
    md.push_str("| Requirement | Required | Current | Status | Priority |\n|---|---|---|---|---|\n");
    for gap in &report.gaps {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            gap.skill_name,
            level_label(gap.required_level),
            gap.current_level.map(level_label).unwrap_or("None"),
            status_label(gap.status),
            priority_label(gap.priority),
        ));
    }
    md.push('\n');

    md.push_str("## Top Recommendation\n\n");
    match &report.top_recommendation {
        Some(gap) => md.push_str(&format!(
            "Learn **{}** to {} level. It is a critical requirement you have no evidence for yet.\n\n",
            gap.skill_name,
            level_label(gap.required_level)
        )),
        None => md.push_str("No critical gaps. Focus on deepening partial skills.\n\n"),
    }

    md.push_str("## Projects\n\n");
    if profile.projects.is_empty() {
        md.push_str("_No projects synced yet._\n");
    }
    for project in &profile.projects {
        md.push_str(&format!("### {}\n", project.name));
        if !project.description.is_empty() {
            md.push_str(&format!("{}\n", project.description));
        }
        if !project.tech_stack.is_empty() {
            md.push_str(&format!("- **Stack:** {}\n", project.tech_stack.join(", ")));
        }
        if let Some(url) = &project.url {
            md.push_str(&format!("- **Link:** {url}\n"));
        }
        md.push('\n');
    }

    md
}

pub fn report_key(profile_id: Uuid, generated_at: DateTime<Utc>) -> String {
    format!(
        "reports/{}/{}.md",
        profile_id,
        generated_at.format("%Y%m%dT%H%M%SZ")
    )
}

/// Uploads a rendered report and returns its object key.
pub async fn export_report(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    profile_id: Uuid,
    markdown: String,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let key = report_key(profile_id, generated_at);
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(markdown.into_bytes()))
        .content_type("text/markdown")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("report upload failed: {e}")))?;

    info!("Uploaded readiness report to s3://{}/{}", bucket, key);
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Project, ProjectSource};
    use crate::models::skill::{Skill, SkillSource};
    use crate::readiness::evaluate_profile;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_report_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            report_key(id, at()),
            "reports/00000000-0000-0000-0000-000000000000/20260504T093000Z.md"
        );
    }

    #[test]
    fn test_empty_profile_report() {
        let profile = UserProfile::new("Asha", "asha@example.com");
        let report = evaluate_profile(&profile);
        let md = render_report_md(&profile, &report, at());

        assert!(md.starts_with("# Readiness Report: Asha"));
        assert!(md.contains("- **Target role:** Frontend Developer"));
        assert!(md.contains("| Skill mastery | 0 / 70 |"));
        assert!(md.contains("| None | Missing |"));
        assert!(md.contains("_No projects synced yet._"));
    }

    #[test]
    fn test_report_lists_projects_and_levels() {
        let mut profile = UserProfile::new("Asha", "asha@example.com");
        profile.current_skills.push(Skill::new(
            "React",
            ProficiencyLevel::Advanced,
            "Frontend",
            SkillSource::GitHub,
        ));
        let mut project = Project::new("tracer", "Ray tracer", vec!["Rust".to_string()], ProjectSource::GitHub);
        project.url = Some("https://github.com/asha/tracer".to_string());
        profile.projects.push(project);

        let report = evaluate_profile(&profile);
        let md = render_report_md(&profile, &report, at());

        assert!(md.contains("| Advanced | Strong |"));
        assert!(md.contains("### tracer"));
        assert!(md.contains("- **Stack:** Rust"));
        assert!(md.contains("- **Link:** https://github.com/asha/tracer"));
    }
}
