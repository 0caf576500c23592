//! Evidence reconciliation: merge newly synced skills and projects into a
//! profile by case-insensitive name, last write wins.
//!
//! An incoming entry replaces the stored one entirely (no field-level merge):
//! a GitHub "React/Intermediate" claim discards an earlier "React/Advanced"
//! resume claim. Result order is existing entries first, then new names in
//! arrival order.

use std::collections::HashMap;

use crate::models::profile::Project;
use crate::models::skill::Skill;

/// Anything merged by normalized name.
pub trait MergeKey {
    fn merge_name(&self) -> &str;
}

impl MergeKey for Skill {
    fn merge_name(&self) -> &str {
        &self.name
    }
}

impl MergeKey for Project {
    fn merge_name(&self) -> &str {
        &self.name
    }
}

/// Merges both evidence kinds in one call.
pub fn merge_evidence(
    existing_skills: Vec<Skill>,
    new_skills: Vec<Skill>,
    existing_projects: Vec<Project>,
    new_projects: Vec<Project>,
) -> (Vec<Skill>, Vec<Project>) {
    (
        merge_by_name(existing_skills, new_skills),
        merge_by_name(existing_projects, new_projects),
    )
}

/// Upserts every entry of `existing` then `incoming` into an insertion-ordered
/// map keyed by lowercase name. Overwrites keep the slot of the first occurrence.
pub fn merge_by_name<T: MergeKey>(existing: Vec<T>, incoming: Vec<T>) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(existing.len() + incoming.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    for item in existing.into_iter().chain(incoming) {
        let key = item.merge_name().to_lowercase();
        match slots.get(&key).copied() {
            Some(slot) => merged[slot] = item,
            None => {
                slots.insert(key, merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
