// Test double that counts attempts and either fails or delegates to the
// rule-based provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::analysis::provider::{
    AnalysisFailure, AnalysisProvider, EvidenceAnalysis, ResumeAnalysis,
};
use crate::analysis::rule_based::RuleBasedProvider;
use crate::models::market::{ChatMessage, MarketPulse, RepoSummary};
use crate::models::roadmap::RoadmapStep;
use crate::models::skill::Skill;

pub struct StubProvider {
    name: &'static str,
    fail: bool,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(name: &'static str) -> Self {
        Self {
            name,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn attempt(&self) -> Result<(), AnalysisFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AnalysisFailure::Malformed(format!("{} unavailable", self.name)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AnalysisProvider for StubProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn extract_skills_from_resume(
        &self,
        text: &str,
    ) -> Result<ResumeAnalysis, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider.extract_skills_from_resume(text).await
    }

    async fn analyze_linkedin_profile(
        &self,
        text: &str,
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider.analyze_linkedin_profile(text).await
    }

    async fn analyze_github_repos(
        &self,
        repos: &[RepoSummary],
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider.analyze_github_repos(repos).await
    }

    async fn generate_roadmap(
        &self,
        current_skills: &[Skill],
        target_role: &str,
    ) -> Result<Vec<RoadmapStep>, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider
            .generate_roadmap(current_skills, target_role)
            .await
    }

    async fn regenerate_step(
        &self,
        step: &RoadmapStep,
        target_role: &str,
    ) -> Result<RoadmapStep, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider.regenerate_step(step, target_role).await
    }

    async fn fetch_live_market_pulse(
        &self,
        role: &str,
        location: Option<&str>,
    ) -> Result<MarketPulse, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider.fetch_live_market_pulse(role, location).await
    }

    async fn get_mentor_advice(
        &self,
        history: &[ChatMessage],
        profile_summary: &str,
    ) -> Result<String, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider
            .get_mentor_advice(history, profile_summary)
            .await
    }

    async fn generate_cover_letter(
        &self,
        resume_summary: &str,
        job_title: &str,
        company_name: &str,
    ) -> Result<String, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider
            .generate_cover_letter(resume_summary, job_title, company_name)
            .await
    }

    async fn get_winning_strategy(
        &self,
        job_title: &str,
        company: &str,
        user_skills: &[String],
    ) -> Result<String, AnalysisFailure> {
        self.attempt()?;
        RuleBasedProvider
            .get_winning_strategy(job_title, company, user_skills)
            .await
    }
}
