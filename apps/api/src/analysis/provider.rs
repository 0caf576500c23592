//! Analysis Provider: the capability contract shared by the remote and the
//! rule-based backends.
//!
//! `AnalysisService` holds one `Arc<dyn AnalysisProvider>` per tier, so either
//! backend (or a test double) can be swapped in without touching callers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::market::{ChatMessage, MarketPulse, RepoSummary};
use crate::models::profile::Project;
use crate::models::roadmap::RoadmapStep;
use crate::models::skill::Skill;

/// Any provider-side failure. The orchestrator treats every variant alike.
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Skills, projects and a coarse seniority label extracted from a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub skills: Vec<Skill>,
    pub level: String,
    pub projects: Vec<Project>,
}

/// Skills and projects extracted from LinkedIn or GitHub evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceAnalysis {
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

impl From<ResumeAnalysis> for EvidenceAnalysis {
    fn from(analysis: ResumeAnalysis) -> Self {
        Self {
            skills: analysis.skills,
            projects: analysis.projects,
        }
    }
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Human-readable name used in fallback logs.
    fn name(&self) -> &str;

    async fn extract_skills_from_resume(&self, text: &str)
        -> Result<ResumeAnalysis, AnalysisFailure>;

    async fn analyze_linkedin_profile(&self, text: &str)
        -> Result<EvidenceAnalysis, AnalysisFailure>;

    async fn analyze_github_repos(
        &self,
        repos: &[RepoSummary],
    ) -> Result<EvidenceAnalysis, AnalysisFailure>;

    async fn generate_roadmap(
        &self,
        current_skills: &[Skill],
        target_role: &str,
    ) -> Result<Vec<RoadmapStep>, AnalysisFailure>;

    async fn regenerate_step(
        &self,
        step: &RoadmapStep,
        target_role: &str,
    ) -> Result<RoadmapStep, AnalysisFailure>;

    async fn fetch_live_market_pulse(
        &self,
        role: &str,
        location: Option<&str>,
    ) -> Result<MarketPulse, AnalysisFailure>;

    async fn get_mentor_advice(
        &self,
        history: &[ChatMessage],
        profile_summary: &str,
    ) -> Result<String, AnalysisFailure>;

    async fn generate_cover_letter(
        &self,
        resume_summary: &str,
        job_title: &str,
        company_name: &str,
    ) -> Result<String, AnalysisFailure>;

    async fn get_winning_strategy(
        &self,
        job_title: &str,
        company: &str,
        user_skills: &[String],
    ) -> Result<String, AnalysisFailure>;
}
