//! knapforge solver engine
//!
//! This crate provides the exact solver for budgeted project selection
//! (the 0-1 knapsack problem):
//! - Fractional upper bounds ([`BoundCalculator`])
//! - Best-first frontier and pruning rules
//! - The branch-and-bound solver with greedy warm start
//! - Budget sensitivity sweeps
//! - Termination conditions and search listeners

pub mod bound;
pub mod event;
pub mod frontier;
pub mod greedy;
pub mod incumbent;
pub mod node;
pub mod pruner;
pub mod scope;
pub mod sensitivity;
pub mod solution;
pub mod solver;
pub mod stats;
pub mod termination;

pub use bound::BoundCalculator;
pub use event::{CountingListener, NoOpListener, SearchListener};
pub use frontier::Frontier;
pub use greedy::{GreedyHeuristic, GreedySolution};
pub use incumbent::Incumbent;
pub use node::{SearchNode, Selection};
pub use pruner::PruneCause;
pub use scope::SolverScope;
pub use sensitivity::{BudgetRange, SensitivityAnalyzer, SensitivityPoint, SensitivityReport};
pub use solution::{HeuristicComparison, SelectedProject, Solution, SolveStatus};
pub use solver::{BranchAndBoundSolver, ConfiguredTermination, SolverState};
pub use stats::{PruneCounts, SearchStatistics};
pub use termination::{
    ExternalTermination, NoTermination, NodeCountTermination, OrTermination, Termination,
    TimeTermination,
};
