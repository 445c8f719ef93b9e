//! Termination conditions for the search.
//!
//! A termination is checked once per expansion. When it fires the search
//! stops and reports the best selection found so far as
//! [`SolveStatus::LimitReached`](crate::SolveStatus::LimitReached).

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop searching.
///
/// `Sync` is required so a solver can be shared across the threads of a
/// parallel sensitivity sweep.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool;
}

/// Never terminates; the search runs until it proves optimality.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    #[inline]
    fn is_terminated(&self, _solver_scope: &SolverScope) -> bool {
        false
    }
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        self.as_ref()
            .is_some_and(|t| t.is_terminated(solver_scope))
    }
}

#[cfg(test)]
mod tests;
