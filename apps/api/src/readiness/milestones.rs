//! Roadmap completion tokens and progress.

use crate::models::roadmap::{CompletionToken, RoadmapStep, TaskKind};

pub const ROADMAP_DAYS: u32 = 45;
pub const TASKS_PER_DAY: u32 = TaskKind::ALL.len() as u32;
/// Denominator for the milestone component of the readiness score.
pub const TOTAL_ROADMAP_TASKS: u32 = ROADMAP_DAYS * TASKS_PER_DAY;

/// Counts well-formed completion tokens; anything else stored alongside is ignored.
pub fn count_completed_tasks(completed: &[String]) -> u32 {
    completed
        .iter()
        .filter(|raw| raw.parse::<CompletionToken>().is_ok())
        .count() as u32
}

pub fn is_task_complete(completed: &[String], day: u32, task: TaskKind) -> bool {
    let token = CompletionToken::new(day, task).to_string();
    completed.iter().any(|c| *c == token)
}

/// Adds the token when absent, removes it when present.
pub fn toggle_task(completed: &mut Vec<String>, day: u32, task: TaskKind) {
    let token = CompletionToken::new(day, task).to_string();
    if let Some(pos) = completed.iter().position(|c| *c == token) {
        completed.remove(pos);
    } else {
        completed.push(token);
    }
}

/// Clears a fully completed day, otherwise marks all four tasks done
/// (re-appended at the end).
pub fn toggle_full_day(completed: &mut Vec<String>, day: u32) {
    let day_tokens: Vec<String> = TaskKind::ALL
        .iter()
        .map(|&task| CompletionToken::new(day, task).to_string())
        .collect();
    let is_full = day_tokens.iter().all(|t| completed.contains(t));

    completed.retain(|c| !day_tokens.contains(c));
    if !is_full {
        completed.extend(day_tokens);
    }
}

/// Percentage of the day's four tasks that are done.
pub fn day_progress(completed: &[String], day: u32) -> f64 {
    let done = TaskKind::ALL
        .iter()
        .filter(|&&task| is_task_complete(completed, day, task))
        .count();
    done as f64 / f64::from(TASKS_PER_DAY) * 100.0
}

/// Rounded percentage of all roadmap tasks done; 0 for an empty roadmap.
pub fn global_progress(completed: &[String], step_count: usize) -> u32 {
    if step_count == 0 {
        return 0;
    }
    let total = step_count as f64 * f64::from(TASKS_PER_DAY);
    (f64::from(count_completed_tasks(completed)) / total * 100.0).round() as u32
}

/// Sets `is_completed` on every step whose four tasks are done.
pub fn mark_completed_steps(steps: &mut [RoadmapStep], completed: &[String]) {
    for step in steps {
        step.is_completed = TaskKind::ALL
            .iter()
            .all(|&task| is_task_complete(completed, step.day, task));
    }
}
