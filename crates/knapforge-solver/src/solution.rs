//! Solve results.
//!
//! A [`Solution`] is created once at the end of a solve call and never
//! changed afterwards. It carries the selected projects, the search
//! statistics and the comparison against the greedy baseline.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use knapforge_core::{Budget, KnapforgeError, ProjectCatalog, ProjectId, Result};
use serde::{Serialize, Serializer};

use crate::greedy::GreedySolution;
use crate::stats::{PruneCounts, SearchStatistics};

/// Impact tolerance used by [`Solution::validate`].
pub const IMPACT_TOLERANCE: f64 = 0.01;

/// Whether the reported selection is proven optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The search converged; no selection has a higher impact.
    Optimal,
    /// A termination limit fired first; the selection is the best found.
    LimitReached,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::LimitReached => write!(f, "limit reached"),
        }
    }
}

/// A selected project as reported in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedProject {
    pub id: ProjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub cost: f64,
    pub impact: f64,
    pub efficiency: f64,
}

impl SelectedProject {
    fn from_catalog(catalog: &ProjectCatalog, index: usize) -> Self {
        let project = catalog.project(index);
        Self {
            id: project.id().clone(),
            name: project.name().map(str::to_owned),
            category: project.category().map(str::to_owned),
            cost: project.cost(),
            impact: project.impact(),
            efficiency: project.efficiency(),
        }
    }

    /// Name if present, identifier otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Exact result compared with the greedy baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeuristicComparison {
    pub heuristic_impact: f64,
    pub heuristic_cost: f64,
    pub improvement_over_heuristic: f64,
    /// Relative improvement in percent; 0 when the heuristic found nothing.
    pub improvement_over_heuristic_pct: f64,
}

impl HeuristicComparison {
    pub(crate) fn new(greedy: &GreedySolution, total_impact: f64) -> Self {
        let heuristic_impact = greedy.total_impact();
        let improvement = total_impact - heuristic_impact;
        let improvement_pct = if heuristic_impact > 0.0 {
            improvement / heuristic_impact * 100.0
        } else {
            0.0
        };
        Self {
            heuristic_impact,
            heuristic_cost: greedy.total_cost(),
            improvement_over_heuristic: improvement,
            improvement_over_heuristic_pct: improvement_pct,
        }
    }
}

/// Result of one solve call.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub status: SolveStatus,
    /// Selected projects in catalog input order.
    pub selected: Vec<SelectedProject>,
    pub total_cost: f64,
    pub total_impact: f64,
    pub budget: Budget,
    pub budget_used_pct: f64,
    pub selected_count: usize,
    pub available_count: usize,
    pub statistics: SearchStatistics,
    pub pruning_efficiency: f64,
    #[serde(flatten)]
    pub heuristic: HeuristicComparison,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl Solution {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        catalog: &ProjectCatalog,
        budget: Budget,
        mut indices: Vec<usize>,
        total_cost: f64,
        total_impact: f64,
        status: SolveStatus,
        statistics: SearchStatistics,
        greedy: &GreedySolution,
        duration: Duration,
    ) -> Self {
        indices.sort_unstable();
        let selected: Vec<SelectedProject> = indices
            .iter()
            .map(|&i| SelectedProject::from_catalog(catalog, i))
            .collect();

        Self {
            status,
            selected_count: selected.len(),
            selected,
            total_cost,
            total_impact,
            budget,
            budget_used_pct: percent(total_cost, budget.value()),
            available_count: catalog.len(),
            pruning_efficiency: statistics.pruning_efficiency(catalog.searchable_len()),
            statistics,
            heuristic: HeuristicComparison::new(greedy, total_impact),
            duration,
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    /// Identifiers of the selected projects, in input order.
    pub fn selected_ids(&self) -> Vec<&ProjectId> {
        self.selected.iter().map(|p| &p.id).collect()
    }

    pub fn nodes_expanded(&self) -> u64 {
        self.statistics.nodes_expanded
    }

    pub fn nodes_pruned(&self) -> PruneCounts {
        self.statistics.nodes_pruned
    }

    /// Checks the solution against `catalog`.
    ///
    /// Totals are recomputed from the selected identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`KnapforgeError::InvalidSolution`] if an identifier is unknown
    /// or repeated, if the recomputed cost exceeds the budget, or if the
    /// recomputed impact differs from `total_impact` by more than
    /// [`IMPACT_TOLERANCE`].
    pub fn validate(&self, catalog: &ProjectCatalog) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.selected.len());
        let mut cost = 0.0;
        let mut impact = 0.0;

        for selected in &self.selected {
            let Some((_, project)) = catalog.find(selected.id.as_str()) else {
                return Err(KnapforgeError::InvalidSolution(format!(
                    "unknown project '{}'",
                    selected.id
                )));
            };
            if !seen.insert(selected.id.as_str()) {
                return Err(KnapforgeError::InvalidSolution(format!(
                    "project '{}' selected twice",
                    selected.id
                )));
            }
            cost += project.cost();
            impact += project.impact();
        }

        let budget = self.budget.value();
        if cost > budget + 1e-9 * budget.max(1.0) {
            return Err(KnapforgeError::InvalidSolution(format!(
                "total cost {cost} exceeds budget {budget}"
            )));
        }
        if (impact - self.total_impact).abs() > IMPACT_TOLERANCE {
            return Err(KnapforgeError::InvalidSolution(format!(
                "reported impact {} does not match recomputed impact {impact}",
                self.total_impact
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution ({}):", self.status)?;
        writeln!(
            f,
            "  Selected:              {} of {}",
            self.selected_count, self.available_count
        )?;
        for project in &self.selected {
            writeln!(
                f,
                "    - {:<32} cost {:>10.2}  impact {:>8.2}",
                project.label(),
                project.cost,
                project.impact
            )?;
        }
        writeln!(
            f,
            "  Total cost:            {:.2} / {:.2} ({:.1}%)",
            self.total_cost,
            self.budget.value(),
            self.budget_used_pct
        )?;
        writeln!(f, "  Total impact:          {:.2}", self.total_impact)?;
        writeln!(
            f,
            "  Greedy impact:         {:.2} (+{:.2}, {:.1}%)",
            self.heuristic.heuristic_impact,
            self.heuristic.improvement_over_heuristic,
            self.heuristic.improvement_over_heuristic_pct
        )?;
        writeln!(
            f,
            "  Pruning efficiency:    {:.2}%",
            self.pruning_efficiency * 100.0
        )?;
        writeln!(f, "  Duration:              {:.2?}", self.duration)?;
        write!(f, "{}", self.statistics)
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_nanos() as f64 / 1e6)
}
