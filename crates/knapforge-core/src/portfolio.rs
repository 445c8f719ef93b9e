//! Built-in sample portfolio.
//!
//! Fifteen employee-retention initiatives. Costs are in thousands of
//! currency units; impacts are the expected reduction in attrition, in
//! percentage points.

use crate::domain::Project;

/// `(id, name, category, cost, impact)` of every built-in project.
const RETENTION_PROJECTS: [(u64, &str, &str, f64, f64); 15] = [
    (1, "Job Satisfaction Improvement Program", "Engagement", 120.0, 25.0),
    (2, "Work-Life Balance Initiative", "Wellbeing", 80.0, 18.0),
    (3, "Career Development Plan", "Development", 60.0, 15.0),
    (4, "Recognition and Rewards Program", "Recognition", 50.0, 12.0),
    (5, "Competitive Salary Adjustment", "Compensation", 200.0, 20.0),
    (6, "Mentoring and Coaching Program", "Development", 40.0, 10.0),
    (7, "Flexible Hours and Remote Work", "Wellbeing", 30.0, 14.0),
    (8, "Technical Training", "Development", 70.0, 13.0),
    (9, "Workplace Environment Upgrade", "Infrastructure", 90.0, 16.0),
    (10, "Mental Health and Wellbeing Program", "Wellbeing", 55.0, 11.0),
    (11, "Continuous Feedback System", "Communication", 35.0, 9.0),
    (12, "Diversity and Inclusion Program", "Culture", 65.0, 12.0),
    (13, "Flexible Personalised Benefits", "Benefits", 100.0, 17.0),
    (14, "New Hire Onboarding Program", "Onboarding", 45.0, 10.0),
    (15, "Team Building and Culture Initiative", "Culture", 40.0, 8.0),
];

/// The built-in retention portfolio, in its canonical order.
///
/// # Example
///
/// ```
/// use knapforge_core::portfolio::retention_portfolio;
///
/// let projects = retention_portfolio();
/// assert_eq!(projects.len(), 15);
/// assert_eq!(projects[6].id().as_str(), "7");
/// ```
pub fn retention_portfolio() -> Vec<Project> {
    RETENTION_PROJECTS
        .iter()
        .map(|&(id, name, category, cost, impact)| {
            Project::new(id, cost, impact)
                .with_name(name)
                .with_category(category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProjectCatalog;

    #[test]
    fn test_portfolio_is_valid() {
        let catalog = ProjectCatalog::new(retention_portfolio()).unwrap();
        assert_eq!(catalog.searchable_len(), 15);
        assert_eq!(catalog.total_cost(), 1080.0);
        assert_eq!(catalog.total_impact(), 210.0);
    }

    #[test]
    fn test_best_ratio_first() {
        let catalog = ProjectCatalog::new(retention_portfolio()).unwrap();
        let first = catalog.project(catalog.ranked()[0].index);
        assert_eq!(first.name(), Some("Flexible Hours and Remote Work"));
    }
}
