//! Pruning rules.
//!
//! Pure predicates applied to a child when it is created, before it can
//! enter the frontier:
//! - **Infeasibility**: the child already spends more than the budget.
//! - **Completeness**: the child has decided every project; it is offered
//!   to the incumbent and then dropped, since it cannot branch.
//! - **Optimality**: the child's bound cannot beat the incumbent. The test
//!   is non-strict so ties are pruned too.

use std::fmt;

use knapforge_core::Budget;
use serde::Serialize;

/// Why a node was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PruneCause {
    Infeasible,
    Optimality,
    Completeness,
}

impl fmt::Display for PruneCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneCause::Infeasible => write!(f, "infeasible"),
            PruneCause::Optimality => write!(f, "optimality"),
            PruneCause::Completeness => write!(f, "completeness"),
        }
    }
}

/// Returns true if `included_cost` exceeds the budget.
#[inline]
pub fn is_infeasible(included_cost: f64, budget: Budget) -> bool {
    !budget.admits(included_cost)
}

/// Returns true if a subtree bounded by `bound` cannot improve on
/// `incumbent_impact`.
#[inline]
pub fn is_dominated(bound: f64, incumbent_impact: f64) -> bool {
    bound <= incumbent_impact
}

/// Returns true if a node at `level` has decided all `project_count` projects.
#[inline]
pub fn is_complete(level: usize, project_count: usize) -> bool {
    level >= project_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_is_strict() {
        let budget = Budget::new(100.0).unwrap();
        assert!(!is_infeasible(100.0, budget));
        assert!(is_infeasible(100.5, budget));
    }

    #[test]
    fn test_dominated_prunes_ties() {
        assert!(is_dominated(10.0, 10.0));
        assert!(is_dominated(9.0, 10.0));
        assert!(!is_dominated(10.5, 10.0));
    }

    #[test]
    fn test_complete() {
        assert!(is_complete(4, 4));
        assert!(!is_complete(3, 4));
        assert!(is_complete(0, 0));
    }

    #[test]
    fn test_cause_display() {
        assert_eq!(PruneCause::Infeasible.to_string(), "infeasible");
        assert_eq!(PruneCause::Optimality.to_string(), "optimality");
        assert_eq!(PruneCause::Completeness.to_string(), "completeness");
    }
}
