//! Remote provider backed by Gemini.
//!
//! Every response is parsed into a strict wire shape and validated before it
//! is converted into domain types. Anything that does not fit is an
//! `AnalysisFailure::Malformed`, which lets the service fall back.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::analysis::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, GITHUB_PROMPT_TEMPLATE, LINKEDIN_PROMPT_TEMPLATE,
    MARKET_PULSE_PROMPT_TEMPLATE, MENTOR_PROMPT_TEMPLATE, REGENERATE_STEP_PROMPT_TEMPLATE,
    RESUME_PROMPT_TEMPLATE, ROADMAP_PROMPT_TEMPLATE, STRATEGY_PROMPT_TEMPLATE,
};
use crate::analysis::provider::{
    AnalysisFailure, AnalysisProvider, EvidenceAnalysis, ResumeAnalysis,
};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, STRATEGIST_SYSTEM};
use crate::llm_client::{GeminiClient, LlmError, FAST_MODEL, PRO_MODEL};
use crate::models::market::{ChatMessage, MarketPulse, RepoSummary};
use crate::models::profile::{Project, ProjectSource};
use crate::models::roadmap::{Phase, RoadmapStep};
use crate::models::skill::{ProficiencyLevel, Skill, SkillSource};

/// Repositories beyond this are not sent to the model.
pub const MAX_GITHUB_REPOS: usize = 15;
pub const DEFAULT_MARKET_LOCATION: &str = "India";
const GITHUB_SKILL_CONFIDENCE: f32 = 0.95;
const UNSPECIFIED_LEVEL: &str = "Not specified";

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSkill {
    name: String,
    level: ProficiencyLevel,
    #[serde(default)]
    category: String,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    is_soft_skill: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProject {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tech_stack: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeWire {
    skills: Vec<WireSkill>,
    #[serde(default)]
    projects: Vec<WireProject>,
    #[serde(default)]
    detected_experience_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireExperience {
    role: String,
    company: String,
}

#[derive(Debug, Deserialize)]
struct LinkedInWire {
    #[serde(default)]
    skills: Vec<WireSkill>,
    #[serde(default)]
    experience: Vec<WireExperience>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubWire {
    #[serde(default)]
    skills: Vec<WireSkill>,
    #[serde(default)]
    top_projects: Vec<WireProject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStep {
    day: u32,
    phase: Phase,
    primary_goal: String,
    learning_task: String,
    practice_task: String,
    building_task: String,
    review_task: String,
    expected_output: String,
    time_estimate: String,
    #[serde(default)]
    milestone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePulse {
    hot_skills: Vec<String>,
    emerging_trends: Vec<String>,
    salary_range: String,
    market_outlook: String,
    #[serde(default)]
    internship_recommendations: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation and conversion
// ────────────────────────────────────────────────────────────────────────────

fn malformed(message: impl Into<String>) -> AnalysisFailure {
    AnalysisFailure::Malformed(message.into())
}

fn convert_skill(wire: WireSkill, source: SkillSource) -> Result<Skill, AnalysisFailure> {
    let name = wire.name.trim();
    if name.is_empty() {
        return Err(malformed("skill with empty name"));
    }
    if let Some(confidence) = wire.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(malformed(format!(
                "confidence {confidence} for '{name}' is outside [0, 1]"
            )));
        }
    }

    let mut skill = Skill::new(name, wire.level, wire.category.trim(), source);
    skill.confidence = wire.confidence;
    if wire.is_soft_skill {
        skill = skill.soft();
    }
    Ok(skill)
}

fn convert_skills(
    wire: Vec<WireSkill>,
    source: SkillSource,
) -> Result<Vec<Skill>, AnalysisFailure> {
    wire.into_iter()
        .map(|skill| convert_skill(skill, source))
        .collect()
}

fn convert_project(wire: WireProject, source: ProjectSource) -> Result<Project, AnalysisFailure> {
    let name = wire.name.trim();
    if name.is_empty() {
        return Err(malformed("project with empty name"));
    }
    Ok(Project::new(name, wire.description, wire.tech_stack, source))
}

fn convert_projects(
    wire: Vec<WireProject>,
    source: ProjectSource,
) -> Result<Vec<Project>, AnalysisFailure> {
    wire.into_iter()
        .map(|project| convert_project(project, source))
        .collect()
}

fn resume_from_wire(wire: ResumeWire) -> Result<ResumeAnalysis, AnalysisFailure> {
    let level = wire
        .detected_experience_level
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| UNSPECIFIED_LEVEL.to_string());

    Ok(ResumeAnalysis {
        skills: convert_skills(wire.skills, SkillSource::Resume)?,
        projects: convert_projects(wire.projects, ProjectSource::Manual)?,
        level,
    })
}

fn linkedin_from_wire(wire: LinkedInWire) -> Result<EvidenceAnalysis, AnalysisFailure> {
    let projects = wire
        .experience
        .into_iter()
        .map(|e| {
            if e.role.trim().is_empty() || e.company.trim().is_empty() {
                return Err(malformed("experience entry without role or company"));
            }
            Ok(Project::new(
                format!("{} at {}", e.role.trim(), e.company.trim()),
                "Experience identified from professional social profile signal.",
                Vec::new(),
                ProjectSource::LinkedIn,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EvidenceAnalysis {
        skills: convert_skills(wire.skills, SkillSource::LinkedIn)?,
        projects,
    })
}

fn github_from_wire(wire: GitHubWire) -> Result<EvidenceAnalysis, AnalysisFailure> {
    let skills = convert_skills(wire.skills, SkillSource::GitHub)?
        .into_iter()
        .map(|mut skill| {
            skill.is_soft_skill = false;
            skill.confidence = Some(GITHUB_SKILL_CONFIDENCE);
            skill
        })
        .collect();

    Ok(EvidenceAnalysis {
        skills,
        projects: convert_projects(wire.top_projects, ProjectSource::GitHub)?,
    })
}

fn step_from_wire(wire: WireStep) -> Result<RoadmapStep, AnalysisFailure> {
    if wire.day == 0 {
        return Err(malformed("roadmap day must be at least 1"));
    }
    if wire.primary_goal.trim().is_empty() {
        return Err(malformed(format!("day {} has no primary goal", wire.day)));
    }

    Ok(RoadmapStep {
        day: wire.day,
        phase: wire.phase,
        primary_goal: wire.primary_goal,
        learning_task: wire.learning_task,
        practice_task: wire.practice_task,
        building_task: wire.building_task,
        review_task: wire.review_task,
        expected_output: wire.expected_output,
        time_estimate: wire.time_estimate,
        milestone: wire.milestone.filter(|m| !m.trim().is_empty()),
        is_completed: false,
    })
}

fn roadmap_from_wire(wire: Vec<WireStep>) -> Result<Vec<RoadmapStep>, AnalysisFailure> {
    if wire.is_empty() {
        return Err(malformed("roadmap has no steps"));
    }
    let mut steps = wire
        .into_iter()
        .map(step_from_wire)
        .collect::<Result<Vec<_>, _>>()?;
    steps.sort_by_key(|s| s.day);
    Ok(steps)
}

fn pulse_from_wire(wire: WirePulse, sources: Vec<String>) -> Result<MarketPulse, AnalysisFailure> {
    if wire.salary_range.trim().is_empty() || wire.market_outlook.trim().is_empty() {
        return Err(malformed("market pulse is missing salary range or outlook"));
    }
    Ok(MarketPulse {
        hot_skills: wire.hot_skills,
        emerging_trends: wire.emerging_trends,
        salary_range: wire.salary_range,
        market_outlook: wire.market_outlook,
        internship_recommendations: wire.internship_recommendations,
        sources,
    })
}

fn non_empty_text(text: String) -> Result<String, AnalysisFailure> {
    if text.trim().is_empty() {
        Err(AnalysisFailure::Llm(LlmError::EmptyContent))
    } else {
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Provider
// ────────────────────────────────────────────────────────────────────────────

pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub const NAME: &'static str = "Gemini AI Provider";

    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn json_system() -> String {
        format!("{STRATEGIST_SYSTEM} {JSON_ONLY_SYSTEM}")
    }
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn extract_skills_from_resume(
        &self,
        text: &str,
    ) -> Result<ResumeAnalysis, AnalysisFailure> {
        let prompt = RESUME_PROMPT_TEMPLATE.replace("{text}", text);
        let wire: ResumeWire = self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, FAST_MODEL)
            .await?;
        let analysis = resume_from_wire(wire)?;
        info!(
            skills = analysis.skills.len(),
            projects = analysis.projects.len(),
            "Resume analysed"
        );
        Ok(analysis)
    }

    async fn analyze_linkedin_profile(
        &self,
        text: &str,
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        let prompt = LINKEDIN_PROMPT_TEMPLATE.replace("{text}", text);
        let wire: LinkedInWire = self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, FAST_MODEL)
            .await?;
        linkedin_from_wire(wire)
    }

    async fn analyze_github_repos(
        &self,
        repos: &[RepoSummary],
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        let repo_data: Vec<_> = repos
            .iter()
            .take(MAX_GITHUB_REPOS)
            .map(|r| {
                json!({
                    "name": r.name,
                    "description": r.description,
                    "language": r.language,
                    "topics": r.topics,
                })
            })
            .collect();
        let repos_json = serde_json::to_string(&repo_data).map_err(LlmError::from)?;

        let prompt = GITHUB_PROMPT_TEMPLATE.replace("{repos}", &repos_json);
        let wire: GitHubWire = self
            .client
            .call_json(&prompt, JSON_ONLY_SYSTEM, FAST_MODEL)
            .await?;
        github_from_wire(wire)
    }

    async fn generate_roadmap(
        &self,
        current_skills: &[Skill],
        target_role: &str,
    ) -> Result<Vec<RoadmapStep>, AnalysisFailure> {
        let skills_json = serde_json::to_string(current_skills).map_err(LlmError::from)?;
        let prompt = ROADMAP_PROMPT_TEMPLATE
            .replace("{role}", target_role)
            .replace("{skills}", &skills_json);

        let wire: Vec<WireStep> = self
            .client
            .call_json(&prompt, &Self::json_system(), PRO_MODEL)
            .await?;
        let steps = roadmap_from_wire(wire)?;
        info!(role = target_role, days = steps.len(), "Roadmap generated");
        Ok(steps)
    }

    async fn regenerate_step(
        &self,
        step: &RoadmapStep,
        target_role: &str,
    ) -> Result<RoadmapStep, AnalysisFailure> {
        let step_json = serde_json::to_string(step).map_err(LlmError::from)?;
        let prompt = REGENERATE_STEP_PROMPT_TEMPLATE
            .replace("{role}", target_role)
            .replace("{step}", &step_json);

        let wire: WireStep = self
            .client
            .call_json(&prompt, &Self::json_system(), FAST_MODEL)
            .await?;
        let mut regenerated = step_from_wire(wire)?;
        // The step keeps its slot in the roadmap whatever the model answers.
        regenerated.day = step.day;
        regenerated.is_completed = step.is_completed;
        Ok(regenerated)
    }

    async fn fetch_live_market_pulse(
        &self,
        role: &str,
        location: Option<&str>,
    ) -> Result<MarketPulse, AnalysisFailure> {
        let prompt = MARKET_PULSE_PROMPT_TEMPLATE
            .replace("{role}", role)
            .replace("{location}", location.unwrap_or(DEFAULT_MARKET_LOCATION));

        let (wire, sources): (WirePulse, _) = self
            .client
            .call_grounded_json(&prompt, JSON_ONLY_SYSTEM, PRO_MODEL)
            .await?;
        pulse_from_wire(wire, sources)
    }

    async fn get_mentor_advice(
        &self,
        history: &[ChatMessage],
        profile_summary: &str,
    ) -> Result<String, AnalysisFailure> {
        let history_json = serde_json::to_string(history).map_err(LlmError::from)?;
        let prompt = MENTOR_PROMPT_TEMPLATE
            .replace("{profile}", profile_summary)
            .replace("{history}", &history_json);

        let text = self
            .client
            .call_text(&prompt, STRATEGIST_SYSTEM, FAST_MODEL)
            .await?;
        non_empty_text(text)
    }

    async fn generate_cover_letter(
        &self,
        resume_summary: &str,
        job_title: &str,
        company_name: &str,
    ) -> Result<String, AnalysisFailure> {
        let prompt = COVER_LETTER_PROMPT_TEMPLATE
            .replace("{job_title}", job_title)
            .replace("{company}", company_name)
            .replace("{resume}", resume_summary);

        let text = self
            .client
            .call_text(&prompt, STRATEGIST_SYSTEM, FAST_MODEL)
            .await?;
        non_empty_text(text)
    }

    async fn get_winning_strategy(
        &self,
        job_title: &str,
        company: &str,
        user_skills: &[String],
    ) -> Result<String, AnalysisFailure> {
        let prompt = STRATEGY_PROMPT_TEMPLATE
            .replace("{job_title}", job_title)
            .replace("{company}", company.trim())
            .replace("{skills}", &user_skills.join(", "));

        let text = self
            .client
            .call_text(&prompt, STRATEGIST_SYSTEM, FAST_MODEL)
            .await?;
        non_empty_text(text)
    }
}
