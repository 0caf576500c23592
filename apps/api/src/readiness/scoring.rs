//! Readiness scoring: pure weighted skill-coverage score.
//!
//! total = skill mastery (≤70) + evidence (≤20) + milestone momentum (≤10), capped at 100.
//! No I/O; identical inputs always yield an identical breakdown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::skill::{JobRequirement, Skill, SkillSource};

pub const SKILL_POINTS_CAP: f64 = 70.0;
pub const EVIDENCE_POINTS_CAP: f64 = 20.0;
pub const MILESTONE_POINTS_CAP: f64 = 10.0;

const GITHUB_SKILL_POINTS: f64 = 2.0;
const CLAIMED_SKILL_POINTS: f64 = 0.5;
const SOFT_SKILL_INTERVIEW_POINTS: u32 = 2;

/// Derived score. Never the source of truth; always recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_points: u32,
    pub evidence_points: u32,
    pub milestone_points: u32,
    pub total: u32,
    pub interview_readiness: u32,
}

/// Case-insensitive index over a skill list. Later entries win, so the most
/// recently synced claim for a name is the one found.
pub struct SkillIndex<'a> {
    by_name: HashMap<String, &'a Skill>,
}

impl<'a> SkillIndex<'a> {
    pub fn new(skills: &'a [Skill]) -> Self {
        let by_name = skills
            .iter()
            .map(|s| (s.name.to_lowercase(), s))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Skill> {
        self.by_name.get(&name.to_lowercase()).copied()
    }
}

/// Computes the readiness breakdown.
///
/// `completed_tasks` / `total_tasks` feed the milestone component; a zero
/// `total_tasks` contributes nothing instead of dividing by zero.
pub fn calculate_readiness_score(
    user_skills: &[Skill],
    requirements: &[JobRequirement],
    completed_tasks: u32,
    total_tasks: u32,
) -> ScoreBreakdown {
    // A role without requirements cannot be prepared for.
    if requirements.is_empty() {
        return ScoreBreakdown::default();
    }

    let skill = skill_mastery(user_skills, requirements);
    let evidence = evidence_points(user_skills);
    let milestone = milestone_points(completed_tasks, total_tasks);

    let total = (skill + evidence + milestone).min(100.0).round() as u32;

    let soft_skills = user_skills.iter().filter(|s| s.is_soft_skill).count() as u32;
    let interview_readiness = total
        .saturating_add(soft_skills.saturating_mul(SOFT_SKILL_INTERVIEW_POINTS))
        .min(100);

    ScoreBreakdown {
        skill_points: skill.round() as u32,
        evidence_points: evidence.round() as u32,
        milestone_points: milestone.round() as u32,
        total,
        interview_readiness,
    }
}

/// Σ(weight × min(1, held/required)) / Σ(weight) × 70, over every requirement.
fn skill_mastery(user_skills: &[Skill], requirements: &[JobRequirement]) -> f64 {
    let index = SkillIndex::new(user_skills);

    let mut earned = 0.0_f64;
    let mut total_weight = 0.0_f64;

    for req in requirements {
        total_weight += req.weight;

        if let Some(skill) = index.get(&req.skill_name) {
            let ratio =
                (f64::from(skill.level.ordinal()) / f64::from(req.min_level.ordinal())).min(1.0);
            earned += req.weight * ratio;
        }
    }

    if total_weight > 0.0 {
        ((earned / total_weight) * SKILL_POINTS_CAP).clamp(0.0, SKILL_POINTS_CAP)
    } else {
        0.0
    }
}

/// Breadth of verified signal across the whole skill list, regardless of role fit.
fn evidence_points(user_skills: &[Skill]) -> f64 {
    let github = user_skills
        .iter()
        .filter(|s| s.source == SkillSource::GitHub)
        .count() as f64;
    let claimed = user_skills
        .iter()
        .filter(|s| matches!(s.source, SkillSource::Resume | SkillSource::Manual))
        .count() as f64;

    (github * GITHUB_SKILL_POINTS + claimed * CLAIMED_SKILL_POINTS).min(EVIDENCE_POINTS_CAP)
}

fn milestone_points(completed_tasks: u32, total_tasks: u32) -> f64 {
    if total_tasks == 0 {
        return 0.0;
    }
    (f64::from(completed_tasks) / f64::from(total_tasks) * MILESTONE_POINTS_CAP)
        .clamp(0.0, MILESTONE_POINTS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skill::{Priority, ProficiencyLevel};

    use ProficiencyLevel::{Advanced, Basic, Intermediate};

    fn skill(name: &str, level: ProficiencyLevel, source: SkillSource) -> Skill {
        Skill::new(name, level, "Technical", source)
    }

    fn req(name: &str, level: ProficiencyLevel, weight: f64) -> JobRequirement {
        JobRequirement::new(name, level, Priority::Critical, weight)
    }

    fn scenario_requirements() -> Vec<JobRequirement> {
        vec![req("React", Advanced, 0.6), req("TypeScript", Intermediate, 0.4)]
    }

    /// Requirement none of the test skills satisfy, so only evidence,
    /// milestones and soft skills move the score.
    fn unmatched_requirements() -> Vec<JobRequirement> {
        vec![req("Docker", Basic, 1.0)]
    }

    fn scenario_skills() -> Vec<Skill> {
        vec![
            skill("React", Intermediate, SkillSource::LinkedIn),
            skill("TypeScript", Advanced, SkillSource::LinkedIn),
        ]
    }

    #[test]
    fn test_end_to_end_skill_points() {
        // (0.6 × 2/3 + 0.4 × 1) / 1.0 × 70 = 56
        let b = calculate_readiness_score(&scenario_skills(), &scenario_requirements(), 0, 180);
        assert_eq!(b.skill_points, 56);
        assert_eq!(b.evidence_points, 0);
        assert_eq!(b.total, 56);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let b = calculate_readiness_score(&[], &[], 0, 180);
        assert_eq!(b, ScoreBreakdown::default());
    }

    #[test]
    fn test_empty_requirements_ignore_evidence_and_progress() {
        let skills = vec![
            skill("Go", Advanced, SkillSource::GitHub),
            skill("Public Speaking", Basic, SkillSource::Resume).soft(),
        ];
        let b = calculate_readiness_score(&skills, &[], 90, 180);
        assert_eq!(b, ScoreBreakdown::default());
    }

    #[test]
    fn test_zero_total_tasks_contributes_no_milestone() {
        let b = calculate_readiness_score(&[], &scenario_requirements(), 5, 0);
        assert_eq!(b.milestone_points, 0);
    }

    #[test]
    fn test_milestone_clamped_when_completed_exceeds_total() {
        let b = calculate_readiness_score(&[], &unmatched_requirements(), 400, 180);
        assert_eq!(b.milestone_points, 10);
        assert_eq!(b.total, 10);
    }

    #[test]
    fn test_milestone_partial() {
        // 90 / 180 × 10 = 5
        let b = calculate_readiness_score(&[], &unmatched_requirements(), 90, 180);
        assert_eq!(b.milestone_points, 5);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let skills = vec![skill("react", Advanced, SkillSource::LinkedIn)];
        let b = calculate_readiness_score(&skills, &[req("React", Advanced, 1.0)], 0, 180);
        assert_eq!(b.skill_points, 70);
    }

    #[test]
    fn test_overqualification_is_not_over_credited() {
        let skills = vec![skill("Git", Advanced, SkillSource::LinkedIn)];
        let reqs = vec![req("Git", Basic, 0.5), req("Docker", Basic, 0.5)];
        let b = calculate_readiness_score(&skills, &reqs, 0, 180);
        assert_eq!(b.skill_points, 35);
    }

    #[test]
    fn test_basic_against_advanced_credits_one_third() {
        let skills = vec![skill("React", Basic, SkillSource::LinkedIn)];
        let b = calculate_readiness_score(&skills, &[req("React", Advanced, 1.0)], 0, 180);
        // 70 / 3 = 23.33
        assert_eq!(b.skill_points, 23);
    }

    #[test]
    fn test_weight_scaling_leaves_skill_points_unchanged() {
        let skills = scenario_skills();
        let base = calculate_readiness_score(&skills, &scenario_requirements(), 0, 180);
        for k in [0.5, 1.1, 3.0, 250.0] {
            let scaled: Vec<_> = scenario_requirements()
                .into_iter()
                .map(|mut r| {
                    r.weight *= k;
                    r
                })
                .collect();
            let b = calculate_readiness_score(&skills, &scaled, 0, 180);
            assert_eq!(b.skill_points, base.skill_points, "k = {k}");
        }
    }

    #[test]
    fn test_raising_a_level_never_lowers_skill_points() {
        let reqs = scenario_requirements();
        let mut last = 0;
        for level in [Basic, Intermediate, Advanced] {
            let skills = vec![
                skill("React", level, SkillSource::LinkedIn),
                skill("TypeScript", Basic, SkillSource::LinkedIn),
            ];
            let b = calculate_readiness_score(&skills, &reqs, 0, 180);
            assert!(b.skill_points >= last);
            last = b.skill_points;
        }
    }

    #[test]
    fn test_evidence_counts_all_skills_by_source() {
        let skills = vec![
            skill("Go", Basic, SkillSource::GitHub),
            skill("Rust", Basic, SkillSource::GitHub),
            skill("React", Basic, SkillSource::Resume),
            skill("Figma", Basic, SkillSource::Manual),
            skill("Leadership", Basic, SkillSource::LinkedIn),
        ];
        // 2×2 + 2×0.5 = 5, LinkedIn contributes nothing
        let b = calculate_readiness_score(&skills, &unmatched_requirements(), 0, 180);
        assert_eq!(b.evidence_points, 5);
    }

    #[test]
    fn test_evidence_capped_at_twenty() {
        let skills: Vec<_> = (0..15)
            .map(|i| skill(&format!("lang-{i}"), Basic, SkillSource::GitHub))
            .collect();
        let b = calculate_readiness_score(&skills, &unmatched_requirements(), 0, 180);
        assert_eq!(b.evidence_points, 20);
    }

    #[test]
    fn test_caps_hold_for_saturated_profile() {
        let mut skills: Vec<_> = (0..30)
            .map(|i| skill(&format!("s{i}"), Advanced, SkillSource::GitHub).soft())
            .collect();
        skills.push(skill("React", Advanced, SkillSource::GitHub));
        let b = calculate_readiness_score(&skills, &[req("React", Advanced, 1.0)], 180, 180);
        assert_eq!(b.skill_points, 70);
        assert_eq!(b.evidence_points, 20);
        assert_eq!(b.milestone_points, 10);
        assert_eq!(b.total, 100);
        assert_eq!(b.interview_readiness, 100);
    }

    #[test]
    fn test_interview_readiness_adds_two_per_soft_skill() {
        let skills = vec![
            skill("Communication", Basic, SkillSource::LinkedIn).soft(),
            skill("Teamwork", Basic, SkillSource::LinkedIn).soft(),
        ];
        let b = calculate_readiness_score(&skills, &unmatched_requirements(), 0, 180);
        assert_eq!(b.total, 0);
        assert_eq!(b.interview_readiness, 4);
    }

    #[test]
    fn test_idempotent() {
        let skills = scenario_skills();
        let reqs = scenario_requirements();
        assert_eq!(
            calculate_readiness_score(&skills, &reqs, 17, 180),
            calculate_readiness_score(&skills, &reqs, 17, 180)
        );
    }

    #[test]
    fn test_index_prefers_latest_claim() {
        let skills = vec![
            skill("React", Advanced, SkillSource::Resume),
            skill("REACT", Basic, SkillSource::GitHub),
        ];
        let index = SkillIndex::new(&skills);
        assert_eq!(index.get("react").map(|s| s.level), Some(Basic));
    }
}
