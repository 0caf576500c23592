// Roadmap delivery: role-scoped Redis cache plus the roadmap HTTP surface.
// Completion tracking itself lives in readiness::milestones.

pub mod cache;
pub mod handlers;
