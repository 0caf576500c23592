//! Gap analysis: per-requirement Strong / Partial / Missing classification.

use serde::{Deserialize, Serialize};

use crate::models::skill::{JobRequirement, Priority, ProficiencyLevel, Skill};
use crate::readiness::scoring::SkillIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapStatus {
    Strong,
    Partial,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub skill_name: String,
    pub status: GapStatus,
    /// `None` when the user holds no matching skill.
    pub current_level: Option<ProficiencyLevel>,
    pub required_level: ProficiencyLevel,
    pub priority: Priority,
}

/// One entry per requirement, in requirement order.
pub fn analyze_gaps(requirements: &[JobRequirement], user_skills: &[Skill]) -> Vec<GapAnalysis> {
    let index = SkillIndex::new(user_skills);

    requirements
        .iter()
        .map(|req| {
            let current_level = index.get(&req.skill_name).map(|s| s.level);
            let status = match current_level {
                None => GapStatus::Missing,
                Some(level) if level < req.min_level => GapStatus::Partial,
                Some(_) => GapStatus::Strong,
            };
            GapAnalysis {
                skill_name: req.skill_name.clone(),
                status,
                current_level,
                required_level: req.min_level,
                priority: req.priority,
            }
        })
        .collect()
}

/// The first Missing + Critical gap in list order. No severity weighting.
pub fn top_priority_gap(gaps: &[GapAnalysis]) -> Option<&GapAnalysis> {
    gaps.iter()
        .find(|g| g.status == GapStatus::Missing && g.priority == Priority::Critical)
}
