//! Built-in role catalog. Requirement weights are relative; the backend role
//! deliberately sums to 1.1.

use std::sync::OnceLock;

use crate::models::skill::{JobRequirement, JobRole, Priority, ProficiencyLevel};

use Priority::{Critical, Important};
use ProficiencyLevel::{Advanced, Basic, Intermediate};

static ROLES: OnceLock<Vec<JobRole>> = OnceLock::new();

pub fn job_roles() -> &'static [JobRole] {
    ROLES.get_or_init(build_roles)
}

/// Finds a role by exact title, falling back to the first catalog entry.
pub fn find_role(title: &str) -> &'static JobRole {
    let roles = job_roles();
    roles
        .iter()
        .find(|r| r.title == title)
        .unwrap_or(&roles[0])
}

fn build_roles() -> Vec<JobRole> {
    vec![
        JobRole {
            id: "frontend".to_string(),
            title: "Frontend Developer".to_string(),
            description:
                "Specializes in creating user-facing interfaces using modern web technologies."
                    .to_string(),
            requirements: vec![
                JobRequirement::new("React", Advanced, Critical, 0.2),
                JobRequirement::new("TypeScript", Intermediate, Critical, 0.15),
                JobRequirement::new("Tailwind CSS", Intermediate, Important, 0.1),
                JobRequirement::new("HTML/CSS", Advanced, Critical, 0.1),
                JobRequirement::new("JavaScript", Advanced, Critical, 0.15),
                JobRequirement::new("Communication", Intermediate, Important, 0.1),
                JobRequirement::new("Git", Intermediate, Important, 0.05),
                JobRequirement::new("Teamwork", Intermediate, Important, 0.05),
                JobRequirement::new("Next.js", Intermediate, Important, 0.1),
            ],
        },
        JobRole {
            id: "backend".to_string(),
            title: "Backend Developer".to_string(),
            description: "Focuses on server-side logic, database management, and API design."
                .to_string(),
            requirements: vec![
                JobRequirement::new("Node.js", Advanced, Critical, 0.2),
                JobRequirement::new("Express", Advanced, Critical, 0.15),
                JobRequirement::new("MongoDB", Intermediate, Critical, 0.15),
                JobRequirement::new("SQL (PostgreSQL)", Intermediate, Important, 0.1),
                JobRequirement::new("Problem Solving", Advanced, Critical, 0.15),
                JobRequirement::new("Docker", Basic, Important, 0.1),
                JobRequirement::new("System Design", Intermediate, Critical, 0.15),
                JobRequirement::new("REST APIs", Advanced, Critical, 0.1),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(role: &JobRole) -> f64 {
        role.requirements.iter().map(|r| r.weight).sum()
    }

    #[test]
    fn test_find_role_by_title() {
        assert_eq!(find_role("Backend Developer").id, "backend");
    }

    #[test]
    fn test_unknown_title_falls_back_to_first_role() {
        assert_eq!(find_role("Astronaut").id, "frontend");
    }

    #[test]
    fn test_catalog_weights_are_not_normalized() {
        assert!((weight_sum(find_role("Frontend Developer")) - 1.0).abs() < 1e-9);
        assert!((weight_sum(find_role("Backend Developer")) - 1.1).abs() < 1e-9);
    }
}
