//! Analysis Service: two-tier provider orchestration.
//!
//! Every AI-backed operation runs against the primary provider exactly once;
//! on any failure the same operation runs against the fallback and its result
//! (or error) is returned as-is. No health state is kept between calls.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::analysis::provider::{
    AnalysisFailure, AnalysisProvider, EvidenceAnalysis, ResumeAnalysis,
};
use crate::models::market::{ChatMessage, MarketPulse, RepoSummary};
use crate::models::roadmap::RoadmapStep;
use crate::models::skill::Skill;

pub struct AnalysisService {
    primary: Arc<dyn AnalysisProvider>,
    fallback: Arc<dyn AnalysisProvider>,
}

impl AnalysisService {
    pub fn new(primary: Arc<dyn AnalysisProvider>, fallback: Arc<dyn AnalysisProvider>) -> Self {
        Self { primary, fallback }
    }

    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> &str {
        self.fallback.name()
    }

    /// Runs `operation` against the primary, then against the fallback if the
    /// primary failed. The fallback attempt never overlaps the primary one.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<T, AnalysisFailure>
    where
        F: Fn(Arc<dyn AnalysisProvider>) -> Fut,
        Fut: Future<Output = Result<T, AnalysisFailure>>,
    {
        match operation(Arc::clone(&self.primary)).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "Primary provider failed, falling back"
                );
                operation(Arc::clone(&self.fallback)).await
            }
        }
    }

    // ── Operation wrappers ──────────────────────────────────────────────────

    pub async fn extract_skills_from_resume(
        &self,
        text: &str,
    ) -> Result<ResumeAnalysis, AnalysisFailure> {
        self.execute(move |p| async move { p.extract_skills_from_resume(text).await })
            .await
    }

    pub async fn analyze_linkedin_profile(
        &self,
        text: &str,
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        self.execute(move |p| async move { p.analyze_linkedin_profile(text).await })
            .await
    }

    pub async fn analyze_github_repos(
        &self,
        repos: &[RepoSummary],
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        self.execute(move |p| async move { p.analyze_github_repos(repos).await })
            .await
    }

    pub async fn generate_roadmap(
        &self,
        skills: &[Skill],
        role: &str,
    ) -> Result<Vec<RoadmapStep>, AnalysisFailure> {
        self.execute(move |p| async move { p.generate_roadmap(skills, role).await })
            .await
    }

    pub async fn regenerate_step(
        &self,
        step: &RoadmapStep,
        role: &str,
    ) -> Result<RoadmapStep, AnalysisFailure> {
        self.execute(move |p| async move { p.regenerate_step(step, role).await })
            .await
    }

    pub async fn fetch_live_market_pulse(
        &self,
        role: &str,
        location: Option<&str>,
    ) -> Result<MarketPulse, AnalysisFailure> {
        self.execute(move |p| async move { p.fetch_live_market_pulse(role, location).await })
            .await
    }

    pub async fn get_mentor_advice(
        &self,
        history: &[ChatMessage],
        profile: &str,
    ) -> Result<String, AnalysisFailure> {
        self.execute(move |p| async move { p.get_mentor_advice(history, profile).await })
            .await
    }

    pub async fn generate_cover_letter(
        &self,
        resume: &str,
        title: &str,
        company: &str,
    ) -> Result<String, AnalysisFailure> {
        self.execute(move |p| async move { p.generate_cover_letter(resume, title, company).await })
            .await
    }

    pub async fn get_winning_strategy(
        &self,
        title: &str,
        company: &str,
        skills: &[String],
    ) -> Result<String, AnalysisFailure> {
        self.execute(move |p| async move { p.get_winning_strategy(title, company, skills).await })
            .await
    }
}
