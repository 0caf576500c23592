use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four fixed roadmap phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Foundation,
    #[serde(rename = "Skill Building")]
    SkillBuilding,
    Projects,
    #[serde(rename = "Interview Readiness")]
    InterviewReadiness,
}

/// One day of the roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub day: u32,
    pub phase: Phase,
    pub primary_goal: String,
    pub learning_task: String,
    pub practice_task: String,
    pub building_task: String,
    pub review_task: String,
    pub expected_output: String,
    pub time_estimate: String,
    pub milestone: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

/// The four tasks of every roadmap day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Learn,
    Practice,
    Build,
    Review,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Learn,
        TaskKind::Practice,
        TaskKind::Build,
        TaskKind::Review,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Learn => "learn",
            TaskKind::Practice => "practice",
            TaskKind::Build => "build",
            TaskKind::Review => "review",
        }
    }
}

impl FromStr for TaskKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

/// A roadmap completion token, persisted as `day-<N>-<task>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    pub day: u32,
    pub task: TaskKind,
}

impl CompletionToken {
    pub fn new(day: u32, task: TaskKind) -> Self {
        Self { day, task }
    }
}

impl fmt::Display for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day-{}-{}", self.day, self.task.as_str())
    }
}

impl FromStr for CompletionToken {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("day-").ok_or(())?;
        let (day, task) = rest.split_once('-').ok_or(())?;
        if day.is_empty() || !day.bytes().all(|b| b.is_ascii_digit()) {
            return Err(());
        }
        Ok(Self {
            day: day.parse().map_err(|_| ())?,
            task: task.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serde_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&Phase::SkillBuilding).unwrap(),
            r#""Skill Building""#
        );
        let phase: Phase = serde_json::from_str(r#""Interview Readiness""#).unwrap();
        assert_eq!(phase, Phase::InterviewReadiness);
    }

    #[test]
    fn test_unknown_phase_rejected() {
        assert!(serde_json::from_str::<Phase>(r#""Warmup""#).is_err());
    }

    #[test]
    fn test_token_parses() {
        let token: CompletionToken = "day-12-practice".parse().unwrap();
        assert_eq!(token, CompletionToken::new(12, TaskKind::Practice));
        assert_eq!(token.to_string(), "day-12-practice");
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for raw in ["day--learn", "day-3-sleep", "day-x-learn", "week-1-learn", "day-1-learn-extra", "day-+1-learn"] {
            assert!(raw.parse::<CompletionToken>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_step_milestone_may_be_null() {
        let json = r#"{
            "day": 3, "phase": "Foundation", "primary_goal": "g", "learning_task": "l",
            "practice_task": "p", "building_task": "b", "review_task": "r",
            "expected_output": "o", "time_estimate": "90 mins", "milestone": null
        }"#;
        let step: RoadmapStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.day, 3);
        assert!(step.milestone.is_none());
        assert!(!step.is_completed);
    }
}
