//! Rule-based provider: deterministic and offline.
//!
//! Keyword matching against a fixed dictionary plus trivial heuristics. This
//! is the availability floor behind the remote provider.

use async_trait::async_trait;

use crate::analysis::provider::{
    AnalysisFailure, AnalysisProvider, EvidenceAnalysis, ResumeAnalysis,
};
use crate::models::market::{ChatMessage, MarketPulse, RepoSummary};
use crate::models::profile::{generate_project_id, Project, ProjectSource};
use crate::models::roadmap::{Phase, RoadmapStep};
use crate::models::skill::{ProficiencyLevel, Skill, SkillSource};

/// Skill name → keywords that imply it. Multi-word variants match as phrases.
const SKILL_KEYWORDS: &[(&str, &[&str])] = &[
    ("React", &["react", "jsx", "hooks", "redux", "frontend"]),
    ("TypeScript", &["typescript", "ts", "typing"]),
    ("JavaScript", &["javascript", "js", "es6"]),
    ("Node.js", &["node", "express", "backend"]),
    ("Tailwind CSS", &["tailwind", "css", "styling"]),
    ("MongoDB", &["mongodb", "nosql", "db"]),
    ("SQL", &["sql", "postgres", "mysql"]),
    ("Git", &["git", "github", "version control"]),
    ("Next.js", &["nextjs", "next.js", "ssr", "ssg"]),
];

/// More skills than this reads as "Senior".
const SENIOR_SKILL_THRESHOLD: usize = 5;

pub struct RuleBasedProvider;

impl RuleBasedProvider {
    pub const NAME: &'static str = "Local Rule-Based Engine";
}

/// Lowercases and collapses every non-alphanumeric run into one space, padded
/// so that `contains(" word ")` is a whole-word test.
fn normalize(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}

// Variants match whole words or phrases, never raw substrings: "ts" must not
// fire inside "results", nor "js" inside "json". Punctuation splits words,
// which is why "next.js" is listed and also implies JavaScript.
fn extract_keyword_skills(text: &str, source: SkillSource) -> Vec<Skill> {
    let haystack = normalize(text);

    SKILL_KEYWORDS
        .iter()
        .filter(|(_, variants)| {
            variants
                .iter()
                .any(|variant| haystack.contains(&normalize(variant)))
        })
        .map(|(name, _)| Skill::new(*name, ProficiencyLevel::Intermediate, "Technical", source))
        .collect()
}

fn experience_level(skill_count: usize) -> &'static str {
    if skill_count > SENIOR_SKILL_THRESHOLD {
        "Senior"
    } else {
        "Junior"
    }
}

#[async_trait]
impl AnalysisProvider for RuleBasedProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn extract_skills_from_resume(
        &self,
        text: &str,
    ) -> Result<ResumeAnalysis, AnalysisFailure> {
        let skills = extract_keyword_skills(text, SkillSource::Resume);
        Ok(ResumeAnalysis {
            level: experience_level(skills.len()).to_string(),
            skills,
            projects: Vec::new(),
        })
    }

    async fn analyze_linkedin_profile(
        &self,
        text: &str,
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        Ok(EvidenceAnalysis {
            skills: extract_keyword_skills(text, SkillSource::LinkedIn),
            projects: Vec::new(),
        })
    }

    async fn analyze_github_repos(
        &self,
        repos: &[RepoSummary],
    ) -> Result<EvidenceAnalysis, AnalysisFailure> {
        let mut skills = Vec::new();
        let mut projects = Vec::with_capacity(repos.len());

        for repo in repos {
            if let Some(language) = &repo.language {
                skills.push(Skill::new(
                    language.clone(),
                    ProficiencyLevel::Intermediate,
                    "Programming Language",
                    SkillSource::GitHub,
                ));
            }
            projects.push(Project {
                id: repo
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(generate_project_id),
                name: repo.name.clone(),
                description: repo.description.clone().unwrap_or_default(),
                url: repo.html_url.clone(),
                tech_stack: repo.language.iter().cloned().collect(),
                source: ProjectSource::GitHub,
                stars: repo.stargazers_count,
            });
        }

        Ok(EvidenceAnalysis { skills, projects })
    }

    async fn generate_roadmap(
        &self,
        _current_skills: &[Skill],
        target_role: &str,
    ) -> Result<Vec<RoadmapStep>, AnalysisFailure> {
        Ok(vec![RoadmapStep {
            day: 1,
            phase: Phase::Foundation,
            primary_goal: "Core Fundamentals".to_string(),
            learning_task: "Focus on basics (Local Fallback)".to_string(),
            practice_task: format!("Review documentation for {target_role}"),
            building_task: "Setup local development environment".to_string(),
            review_task: "Assess baseline competency".to_string(),
            expected_output: "Baseline assessment".to_string(),
            time_estimate: "120 mins".to_string(),
            milestone: Some("Phase 1 Initialization".to_string()),
            is_completed: false,
        }])
    }

    async fn regenerate_step(
        &self,
        step: &RoadmapStep,
        target_role: &str,
    ) -> Result<RoadmapStep, AnalysisFailure> {
        let mut step = step.clone();
        step.primary_goal = format!("{} (Regenerated for {target_role})", step.primary_goal);
        Ok(step)
    }

    async fn fetch_live_market_pulse(
        &self,
        _role: &str,
        _location: Option<&str>,
    ) -> Result<MarketPulse, AnalysisFailure> {
        Ok(MarketPulse {
            hot_skills: vec!["JavaScript".to_string(), "Communication".to_string()],
            emerging_trends: vec!["Remote Work".to_string()],
            salary_range: "Competitive".to_string(),
            market_outlook: "Positive (Local Heuristics)".to_string(),
            internship_recommendations: Vec::new(),
            sources: Vec::new(),
        })
    }

    async fn get_mentor_advice(
        &self,
        _history: &[ChatMessage],
        _profile_summary: &str,
    ) -> Result<String, AnalysisFailure> {
        Ok("Keep practicing daily! You're doing great work.".to_string())
    }

    async fn generate_cover_letter(
        &self,
        _resume_summary: &str,
        _job_title: &str,
        _company_name: &str,
    ) -> Result<String, AnalysisFailure> {
        Ok("I am writing to express my interest in this position...".to_string())
    }

    async fn get_winning_strategy(
        &self,
        _job_title: &str,
        _company: &str,
        _user_skills: &[String],
    ) -> Result<String, AnalysisFailure> {
        Ok("1. Optimize your resume. 2. Network. 3. Be yourself.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[Skill]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_normalize_pads_and_splits() {
        assert_eq!(normalize("Built a Next.js app!"), " built a next js app ");
    }

    #[tokio::test]
    async fn test_resume_keywords_map_to_skills() {
        let analysis = RuleBasedProvider
            .extract_skills_from_resume("Shipped React hooks and Redux dashboards, managed Postgres")
            .await
            .unwrap();
        assert_eq!(names(&analysis.skills), vec!["React", "SQL"]);
        assert!(analysis
            .skills
            .iter()
            .all(|s| s.level == ProficiencyLevel::Intermediate && s.source == SkillSource::Resume));
        assert_eq!(analysis.level, "Junior");
        assert!(analysis.projects.is_empty());
    }

    #[tokio::test]
    async fn test_short_keywords_need_whole_words() {
        // "projects" and "results" must not imply TypeScript
        let analysis = RuleBasedProvider
            .extract_skills_from_resume("Led projects with measurable results")
            .await
            .unwrap();
        assert!(analysis.skills.is_empty());
    }

    #[tokio::test]
    async fn test_keywords_do_not_match_inside_longer_words() {
        let analysis = RuleBasedProvider
            .extract_skills_from_resume("Parsed json payloads into a dbt pipeline")
            .await
            .unwrap();
        assert!(analysis.skills.is_empty());
    }

    #[tokio::test]
    async fn test_phrase_variant_matches() {
        let analysis = RuleBasedProvider
            .extract_skills_from_resume("Comfortable with version control and Next.js")
            .await
            .unwrap();
        assert_eq!(names(&analysis.skills), vec!["JavaScript", "Git", "Next.js"]);
    }

    #[tokio::test]
    async fn test_many_skills_read_as_senior() {
        let analysis = RuleBasedProvider
            .extract_skills_from_resume("react typescript javascript node tailwind mongodb sql")
            .await
            .unwrap();
        assert_eq!(analysis.skills.len(), 7);
        assert_eq!(analysis.level, "Senior");
    }

    #[tokio::test]
    async fn test_linkedin_skills_are_stamped_linkedin() {
        let analysis = RuleBasedProvider
            .analyze_linkedin_profile("Frontend engineer who loves Tailwind")
            .await
            .unwrap();
        assert_eq!(names(&analysis.skills), vec!["React", "Tailwind CSS"]);
        assert!(analysis.skills.iter().all(|s| s.source == SkillSource::LinkedIn));
    }

    #[tokio::test]
    async fn test_github_repos_become_skills_and_projects() {
        let repos = vec![
            RepoSummary {
                id: Some(42),
                name: "dotfiles".to_string(),
                description: None,
                language: None,
                topics: vec![],
                html_url: None,
                stargazers_count: None,
            },
            RepoSummary {
                id: None,
                name: "tracer".to_string(),
                description: Some("A ray tracer".to_string()),
                language: Some("Rust".to_string()),
                topics: vec![],
                html_url: Some("https://github.com/u/tracer".to_string()),
                stargazers_count: Some(12),
            },
        ];
        let analysis = RuleBasedProvider.analyze_github_repos(&repos).await.unwrap();

        assert_eq!(names(&analysis.skills), vec!["Rust"]);
        assert_eq!(analysis.skills[0].source, SkillSource::GitHub);
        assert_eq!(analysis.projects.len(), 2);
        assert_eq!(analysis.projects[0].id, "42");
        assert!(analysis.projects[0].tech_stack.is_empty());
        assert_eq!(analysis.projects[1].tech_stack, vec!["Rust"]);
        assert_eq!(analysis.projects[1].stars, Some(12));
        assert!(!analysis.projects[1].id.is_empty());
    }

    #[tokio::test]
    async fn test_roadmap_and_regeneration() {
        let steps = RuleBasedProvider
            .generate_roadmap(&[], "Backend Developer")
            .await
            .unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].phase, Phase::Foundation);
        assert!(steps[0].practice_task.contains("Backend Developer"));

        let regenerated = RuleBasedProvider
            .regenerate_step(&steps[0], "Backend Developer")
            .await
            .unwrap();
        assert_eq!(
            regenerated.primary_goal,
            "Core Fundamentals (Regenerated for Backend Developer)"
        );
        assert_eq!(regenerated.day, 1);
    }

    #[tokio::test]
    async fn test_market_pulse_is_fixed() {
        let pulse = RuleBasedProvider
            .fetch_live_market_pulse("Frontend Developer", None)
            .await
            .unwrap();
        assert_eq!(pulse.salary_range, "Competitive");
        assert!(pulse.sources.is_empty());
    }
}
