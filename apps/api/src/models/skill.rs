use serde::{Deserialize, Serialize};

/// Ordinal skill strength. The discriminant is the value used for gap
/// comparison and score ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Basic = 1,
    Intermediate = 2,
    Advanced = 3,
}

impl ProficiencyLevel {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Where a skill claim came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillSource {
    Resume,
    GitHub,
    Manual,
    LinkedIn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: ProficiencyLevel,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub is_soft_skill: bool,
    pub source: SkillSource,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        level: ProficiencyLevel,
        category: impl Into<String>,
        source: SkillSource,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            category: category.into(),
            confidence: None,
            is_soft_skill: false,
            source,
        }
    }

    pub fn soft(mut self) -> Self {
        self.is_soft_skill = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    Important,
    NiceToHave,
}

/// One skill demanded by a role. Weights are relative and not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub skill_name: String,
    pub min_level: ProficiencyLevel,
    pub priority: Priority,
    pub weight: f64,
}

impl JobRequirement {
    pub fn new(
        skill_name: impl Into<String>,
        min_level: ProficiencyLevel,
        priority: Priority,
        weight: f64,
    ) -> Self {
        Self {
            skill_name: skill_name.into(),
            min_level,
            priority,
            weight,
        }
    }
}

/// A target role. Requirement order matters for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRole {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: Vec<JobRequirement>,
}
