//! Node count termination.

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of node expansions.
///
/// # Example
///
/// ```
/// use knapforge_solver::NodeCountTermination;
///
/// let term = NodeCountTermination::new(1_000_000);
/// assert_eq!(term.limit(), 1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        solver_scope.nodes_expanded() >= self.limit
    }
}
