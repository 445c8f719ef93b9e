//! Budget sensitivity analysis.
//!
//! Solves the same catalog at several budgets and reports how the optimal
//! selection and impact move between neighbouring budget points. Every
//! point is an independent solve call with its own frontier and
//! incumbent, so points can be evaluated in parallel.

use std::fmt;
use std::time::Instant;

use knapforge_config::SolverConfig;
use knapforge_core::{Budget, KnapforgeError, ProjectCatalog, ProjectId, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::solution::{Solution, SolveStatus};
use crate::solver::{BranchAndBoundSolver, ConfiguredTermination};
use crate::termination::{NoTermination, Termination};

/// Largest number of points a [`BudgetRange`] may expand to.
pub const MAX_RANGE_POINTS: usize = 100_000;

/// An inclusive, evenly spaced range of budgets.
///
/// # Example
///
/// ```
/// use knapforge_solver::BudgetRange;
///
/// let range = BudgetRange::new(100.0, 300.0, 100.0).unwrap();
/// let values: Vec<f64> = range.budgets().iter().map(|b| b.value()).collect();
/// assert_eq!(values, [100.0, 200.0, 300.0]);
///
/// assert!(BudgetRange::new(300.0, 100.0, 50.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetRange {
    start: f64,
    end: f64,
    step: f64,
}

impl BudgetRange {
    /// Creates a range from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`KnapforgeError::InvalidRange`] if a value is not finite, if
    /// `start` is negative, if `step <= 0`, if `start > end`, or if the
    /// range expands to more than [`MAX_RANGE_POINTS`] budgets.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(KnapforgeError::InvalidRange(format!(
                "bounds and step must be finite, got {start}..={end} step {step}"
            )));
        }
        if start < 0.0 {
            return Err(KnapforgeError::InvalidRange(format!(
                "start must be non-negative, got {start}"
            )));
        }
        if step <= 0.0 {
            return Err(KnapforgeError::InvalidRange(format!(
                "step must be positive, got {step}"
            )));
        }
        if start > end {
            return Err(KnapforgeError::InvalidRange(format!(
                "start {start} is greater than end {end}"
            )));
        }

        let range = Self { start, end, step };
        let points = range.len_unchecked();
        if points > MAX_RANGE_POINTS as f64 {
            return Err(KnapforgeError::InvalidRange(format!(
                "{start}..={end} step {step} expands to more than {MAX_RANGE_POINTS} budgets"
            )));
        }
        Ok(range)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of budgets in the range.
    pub fn len(&self) -> usize {
        self.len_unchecked() as usize
    }

    /// A valid range always holds at least `start`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The budgets `start, start + step, ...` up to and including `end`.
    ///
    /// Each budget is computed as `start + i * step` so rounding errors do
    /// not accumulate; `end` is included when it lies within a tiny
    /// relative tolerance of a step.
    pub fn budgets(&self) -> Vec<Budget> {
        (0..self.len())
            .filter_map(|i| Budget::new(self.start + i as f64 * self.step).ok())
            .collect()
    }

    fn len_unchecked(&self) -> f64 {
        ((self.end - self.start) / self.step + 1e-9).floor() + 1.0
    }
}

/// Result of one budget in a sensitivity sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub budget: Budget,
    pub status: SolveStatus,
    pub total_impact: f64,
    pub total_cost: f64,
    pub budget_used_pct: f64,
    pub selected_count: usize,
    /// Selected identifiers in catalog input order.
    pub selected: Vec<ProjectId>,
    /// Identifiers selected here but not at the previous point.
    pub added: Vec<ProjectId>,
    /// Identifiers selected at the previous point but not here.
    pub removed: Vec<ProjectId>,
    /// Impact gained per budget unit since the previous point. `None` for the
    /// first point and when the budget did not change.
    pub marginal_impact_per_unit: Option<f64>,
    pub nodes_expanded: u64,
}

impl SensitivityPoint {
    fn new(solution: &Solution, previous: Option<&SensitivityPoint>) -> Self {
        let selected: Vec<ProjectId> = solution.selected.iter().map(|p| p.id.clone()).collect();

        let (added, removed, marginal) = match previous {
            Some(prev) => {
                let added = difference(&selected, &prev.selected);
                let removed = difference(&prev.selected, &selected);
                let delta_budget = solution.budget.value() - prev.budget.value();
                let marginal = (delta_budget > 0.0)
                    .then(|| (solution.total_impact - prev.total_impact) / delta_budget);
                (added, removed, marginal)
            }
            None => (Vec::new(), Vec::new(), None),
        };

        Self {
            budget: solution.budget,
            status: solution.status,
            total_impact: solution.total_impact,
            total_cost: solution.total_cost,
            budget_used_pct: solution.budget_used_pct,
            selected_count: solution.selected_count,
            selected,
            added,
            removed,
            marginal_impact_per_unit: marginal,
            nodes_expanded: solution.nodes_expanded(),
        }
    }
}

fn difference(left: &[ProjectId], right: &[ProjectId]) -> Vec<ProjectId> {
    left.iter()
        .filter(|id| !right.contains(id))
        .cloned()
        .collect()
}

/// Points of a sensitivity sweep in ascending budget order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensitivityReport {
    pub points: Vec<SensitivityPoint>,
}

impl SensitivityReport {
    pub fn points(&self) -> &[SensitivityPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if every point was solved to proven optimality.
    pub fn is_optimal(&self) -> bool {
        self.points.iter().all(|p| p.status.is_optimal())
    }

    /// The point reached with the highest marginal impact per budget unit.
    /// On ties the later point wins.
    pub fn best_marginal(&self) -> Option<&SensitivityPoint> {
        self.points
            .iter()
            .filter(|p| p.marginal_impact_per_unit.is_some())
            .max_by(|a, b| {
                let a = a.marginal_impact_per_unit.unwrap_or(f64::NEG_INFINITY);
                let b = b.marginal_impact_per_unit.unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            })
    }
}

impl fmt::Display for SensitivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>12} {:>12} {:>8} {:>10} {:>14}",
            "budget", "impact", "cost", "used %", "selected", "marginal/unit"
        )?;
        for point in &self.points {
            let marginal = point
                .marginal_impact_per_unit
                .map(|m| format!("{m:.4}"))
                .unwrap_or_else(|| "-".to_owned());
            writeln!(
                f,
                "{:>12.2} {:>12.2} {:>12.2} {:>8.1} {:>10} {:>14}",
                point.budget.value(),
                point.total_impact,
                point.total_cost,
                point.budget_used_pct,
                point.selected_count,
                marginal
            )?;
        }
        Ok(())
    }
}

/// Runs a solver across many budgets.
///
/// # Example
///
/// ```
/// use knapforge_core::{Project, ProjectCatalog};
/// use knapforge_solver::{BranchAndBoundSolver, BudgetRange, SensitivityAnalyzer};
///
/// let catalog = ProjectCatalog::new(vec![
///     Project::new("item1", 100.0, 30.0),
///     Project::new("item4", 200.0, 70.0),
/// ]).unwrap();
///
/// let analyzer = SensitivityAnalyzer::new(BranchAndBoundSolver::new());
/// let report = analyzer.analyze_range(&catalog, &BudgetRange::new(100.0, 300.0, 100.0).unwrap());
///
/// let impacts: Vec<f64> = report.points().iter().map(|p| p.total_impact).collect();
/// assert_eq!(impacts, [30.0, 70.0, 100.0]);
/// ```
#[derive(Debug, Clone)]
pub struct SensitivityAnalyzer<T = NoTermination> {
    solver: BranchAndBoundSolver<T>,
    parallel: bool,
}

impl<T: Termination> SensitivityAnalyzer<T> {
    pub fn new(solver: BranchAndBoundSolver<T>) -> Self {
        Self {
            solver,
            parallel: false,
        }
    }

    /// Evaluates budget points on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn solver(&self) -> &BranchAndBoundSolver<T> {
        &self.solver
    }

    /// Solves `catalog` at every budget in `range`.
    pub fn analyze_range(&self, catalog: &ProjectCatalog, range: &BudgetRange) -> SensitivityReport {
        self.analyze(catalog, &range.budgets())
    }

    /// Solves `catalog` at every budget in `budgets`.
    ///
    /// Points are reported in ascending budget order whatever the input
    /// order or execution order.
    pub fn analyze(&self, catalog: &ProjectCatalog, budgets: &[Budget]) -> SensitivityReport {
        let start = Instant::now();
        let mut budgets = budgets.to_vec();
        budgets.sort_by(|a, b| a.value().total_cmp(&b.value()));

        let solutions: Vec<Solution> = if self.parallel {
            budgets
                .par_iter()
                .map(|&budget| self.solver.solve(catalog, budget))
                .collect()
        } else {
            budgets
                .iter()
                .map(|&budget| self.solver.solve(catalog, budget))
                .collect()
        };

        let mut points: Vec<SensitivityPoint> = Vec::with_capacity(solutions.len());
        for solution in &solutions {
            let point = SensitivityPoint::new(solution, points.last());
            info!(
                event = "sensitivity_point",
                budget = point.budget.value(),
                total_impact = point.total_impact,
                total_cost = point.total_cost,
                selected_count = point.selected_count,
                marginal_impact_per_unit = point.marginal_impact_per_unit.unwrap_or(0.0),
            );
            points.push(point);
        }

        let report = SensitivityReport { points };
        info!(
            event = "sensitivity_end",
            points = report.len(),
            parallel = self.parallel,
            optimal = report.is_optimal(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        report
    }
}

impl SensitivityAnalyzer<ConfiguredTermination> {
    /// Creates an analyzer whose solver and parallelism come from `config`.
    pub fn from_config(config: &SolverConfig) -> Self {
        SensitivityAnalyzer::new(BranchAndBoundSolver::from_config(config))
            .with_parallel(config.sensitivity.parallel)
    }
}
