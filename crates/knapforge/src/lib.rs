//! knapforge - Exact Budgeted Project Selection in Rust
//!
//! Picks the subset of projects with the highest total impact whose total
//! cost fits a budget, and proves that no better subset exists.
//!
//! # Example
//!
//! ```rust
//! use knapforge::prelude::*;
//!
//! let solution = knapforge::solve(
//!     vec![
//!         Project::new("item1", 100.0, 30.0),
//!         Project::new("item2", 150.0, 45.0),
//!         Project::new("item3", 80.0, 20.0),
//!         Project::new("item4", 200.0, 70.0),
//!     ],
//!     300.0,
//! )
//! .unwrap();
//!
//! assert!(solution.is_optimal());
//! assert_eq!(solution.total_impact, 100.0);
//! ```

// Data model
pub use knapforge_core::portfolio;
pub use knapforge_core::{Budget, KnapforgeError, Project, ProjectCatalog, ProjectId, Result};

// Configuration
pub use knapforge_config::{ConfigError, SolverConfig, DEFAULT_CONFIG_FILE};

// Solver
pub use knapforge_solver::{
    BranchAndBoundSolver, BudgetRange, GreedyHeuristic, SearchListener, SensitivityAnalyzer,
    SensitivityReport, Solution, SolveStatus,
};

/// Termination conditions.
pub mod termination {
    pub use knapforge_solver::termination::*;
}

#[cfg(feature = "console")]
pub use knapforge_console as console;

mod solver;
pub use solver::{analyze, analyze_with_config, solve, solve_with_config};

pub mod prelude {
    pub use super::{
        BranchAndBoundSolver, Budget, BudgetRange, Project, ProjectCatalog, ProjectId,
        SensitivityAnalyzer, Solution, SolveStatus, SolverConfig,
    };
}
