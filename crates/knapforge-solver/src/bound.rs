//! Fractional upper bounds.
//!
//! The bound of a node is the optimum of the LP relaxation of the remaining
//! subproblem: walk the undecided projects in ratio order, take every
//! project that still fits, then take the fitting fraction of the first one
//! that does not. Because the catalog is ratio-sorted, no integral
//! completion can do better.

use knapforge_core::{Budget, ProjectCatalog, RankedProject};

use crate::node::SearchNode;

/// Computes fractional-relaxation upper bounds for one catalog and budget.
///
/// # Example
///
/// ```
/// use knapforge_core::{Budget, Project, ProjectCatalog};
/// use knapforge_solver::BoundCalculator;
///
/// let catalog = ProjectCatalog::new(vec![
///     Project::new("a", 100.0, 30.0),
///     Project::new("d", 200.0, 70.0),
/// ]).unwrap();
/// let bounds = BoundCalculator::new(&catalog, Budget::new(250.0).unwrap());
///
/// // d fits whole (70), then half of a (15)
/// assert_eq!(bounds.bound(0, 0.0, 0.0), 85.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoundCalculator<'a> {
    ranked: &'a [RankedProject],
    budget: f64,
}

impl<'a> BoundCalculator<'a> {
    pub fn new(catalog: &'a ProjectCatalog, budget: Budget) -> Self {
        Self {
            ranked: catalog.ranked(),
            budget: budget.value(),
        }
    }

    /// Upper bound on the impact reachable from a prefix that has decided
    /// the first `level` projects with the given running totals.
    ///
    /// Returns negative infinity for a prefix that is already over budget,
    /// since no completion of it exists.
    pub fn bound(&self, level: usize, included_cost: f64, included_impact: f64) -> f64 {
        let mut remaining = self.budget - included_cost;
        if remaining < 0.0 {
            return f64::NEG_INFINITY;
        }

        let mut bound = included_impact;
        for project in self.ranked.get(level..).unwrap_or_default() {
            if project.cost <= remaining {
                bound += project.impact;
                remaining -= project.cost;
            } else {
                if remaining > 0.0 {
                    bound += (remaining / project.cost) * project.impact;
                }
                break;
            }
        }
        bound
    }

    /// Upper bound for `node`.
    #[inline]
    pub fn bound_for(&self, node: &SearchNode) -> f64 {
        self.bound(node.level(), node.included_cost(), node.included_impact())
    }
}
