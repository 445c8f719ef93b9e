//! Greedy ratio heuristic.
//!
//! Walks the ratio-ordered catalog once and takes every project that still
//! fits. Used to seed the incumbent and as the comparison baseline in
//! solution reports; never returned in place of the exact answer.

use knapforge_core::{Budget, ProjectCatalog};

use crate::node::Selection;

/// Result of the greedy heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct GreedySolution {
    /// Searchable projects taken, as input positions in ratio order.
    selection: Selection,
    cost: f64,
    impact: f64,
    forced_impact: f64,
}

impl GreedySolution {
    /// Searchable projects taken, in the order they were picked.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Cost of the picked projects (forced projects cost nothing).
    pub fn total_cost(&self) -> f64 {
        self.cost
    }

    /// Impact including the forced zero-cost projects.
    pub fn total_impact(&self) -> f64 {
        self.impact + self.forced_impact
    }

    /// Impact of the searchable part only; this is what seeds the incumbent.
    pub fn searched_impact(&self) -> f64 {
        self.impact
    }

    /// All selected input positions, forced ones included, in input order.
    pub fn selected_indices(&self, catalog: &ProjectCatalog) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .selection
            .iter()
            .chain(catalog.forced())
            .copied()
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// The greedy ratio heuristic.
///
/// # Example
///
/// ```
/// use knapforge_core::{Budget, Project, ProjectCatalog};
/// use knapforge_solver::GreedyHeuristic;
///
/// let catalog = ProjectCatalog::new(vec![
///     Project::new("a", 100.0, 30.0),
///     Project::new("b", 150.0, 45.0),
///     Project::new("c", 80.0, 20.0),
///     Project::new("d", 200.0, 70.0),
/// ]).unwrap();
///
/// let greedy = GreedyHeuristic::solve(&catalog, Budget::new(300.0).unwrap());
/// assert_eq!(greedy.total_impact(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyHeuristic;

impl GreedyHeuristic {
    pub fn solve(catalog: &ProjectCatalog, budget: Budget) -> GreedySolution {
        let mut selection = Selection::new();
        let mut cost = 0.0;
        let mut impact = 0.0;

        for project in catalog.ranked() {
            if budget.admits(cost + project.cost) {
                selection.push(project.index);
                cost += project.cost;
                impact += project.impact;
            }
        }

        GreedySolution {
            selection,
            cost,
            impact,
            forced_impact: catalog.forced_impact(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapforge_core::Project;

    #[test]
    fn test_skips_and_continues() {
        // ratio order: a (1.0), b (0.9), c (0.5)
        let catalog = ProjectCatalog::new(vec![
            Project::new("a", 60.0, 60.0),
            Project::new("b", 50.0, 45.0),
            Project::new("c", 30.0, 15.0),
        ])
        .unwrap();

        let greedy = GreedyHeuristic::solve(&catalog, Budget::new(100.0).unwrap());

        // b does not fit after a, but c does
        assert_eq!(greedy.selection(), &[0, 2]);
        assert_eq!(greedy.total_cost(), 90.0);
        assert_eq!(greedy.total_impact(), 75.0);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // Greedy takes the dense small item and blocks the large one.
        let catalog = ProjectCatalog::new(vec![
            Project::new("small", 10.0, 11.0),
            Project::new("large", 100.0, 100.0),
        ])
        .unwrap();

        let greedy = GreedyHeuristic::solve(&catalog, Budget::new(100.0).unwrap());
        assert_eq!(greedy.total_impact(), 11.0);
    }

    #[test]
    fn test_forced_projects_count_towards_impact() {
        let catalog = ProjectCatalog::new(vec![
            Project::new("paid", 10.0, 4.0),
            Project::new("free", 0.0, 6.0),
        ])
        .unwrap();

        let greedy = GreedyHeuristic::solve(&catalog, Budget::ZERO);
        assert!(greedy.selection().is_empty());
        assert_eq!(greedy.searched_impact(), 0.0);
        assert_eq!(greedy.total_impact(), 6.0);
        assert_eq!(greedy.selected_indices(&catalog), vec![1]);
    }
}
