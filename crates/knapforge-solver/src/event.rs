//! Search listeners.
//!
//! Hooks for observing a solve call node by node. Listeners are passed to
//! [`BranchAndBoundSolver::solve_with_listener`](crate::BranchAndBoundSolver::solve_with_listener)
//! and borrowed mutably for the duration of the call, so they can collect
//! whatever they like without interior mutability.
//!
//! # Usage
//!
//! ```
//! use knapforge_core::{Budget, Project, ProjectCatalog};
//! use knapforge_solver::{BranchAndBoundSolver, CountingListener};
//!
//! let catalog = ProjectCatalog::new(vec![
//!     Project::new("a", 100.0, 30.0),
//!     Project::new("b", 150.0, 45.0),
//! ]).unwrap();
//!
//! let mut listener = CountingListener::default();
//! BranchAndBoundSolver::new().solve_with_listener(
//!     &catalog,
//!     Budget::new(200.0).unwrap(),
//!     &mut listener,
//! );
//! assert!(listener.admitted > 0);
//! ```

use crate::node::SearchNode;
use crate::pruner::PruneCause;
use crate::solver::SolverState;

/// Listener for node-level search events.
///
/// All methods default to doing nothing.
pub trait SearchListener {
    /// Called when a bounded node enters the frontier.
    fn on_node_admitted(&mut self, _node: &SearchNode) {}

    /// Called when a node is discarded.
    ///
    /// Infeasible nodes are reported before bounding, so their bound is
    /// still infinite. When the popped node proves that the rest of the
    /// frontier cannot beat the incumbent, only that node is reported; the
    /// others are counted in the statistics.
    fn on_node_pruned(&mut self, _node: &SearchNode, _cause: PruneCause) {}

    /// Called when the search installs a better incumbent.
    fn on_incumbent_improved(&mut self, _impact: f64, _nodes_expanded: u64) {}

    /// Called on every lifecycle transition, starting with
    /// [`SolverState::Initialized`].
    fn on_state_changed(&mut self, _state: SolverState) {}
}

/// A listener that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpListener;

impl SearchListener for NoOpListener {}

/// A listener that counts events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingListener {
    pub admitted: u64,
    pub pruned: u64,
    pub improvements: u64,
}

impl SearchListener for CountingListener {
    fn on_node_admitted(&mut self, _node: &SearchNode) {
        self.admitted += 1;
    }

    fn on_node_pruned(&mut self, _node: &SearchNode, _cause: PruneCause) {
        self.pruned += 1;
    }

    fn on_incumbent_improved(&mut self, _impact: f64, _nodes_expanded: u64) {
        self.improvements += 1;
    }
}
