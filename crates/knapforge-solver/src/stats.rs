//! Search statistics.
//!
//! Plain counters collected by one solve call and copied into its
//! [`Solution`](crate::Solution).

use std::fmt;

use serde::Serialize;

use crate::pruner::PruneCause;

/// Pruned node counts, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PruneCounts {
    pub infeasible: u64,
    pub optimality: u64,
    pub completeness: u64,
}

impl PruneCounts {
    #[inline]
    pub fn record(&mut self, cause: PruneCause) {
        self.record_many(cause, 1);
    }

    pub fn record_many(&mut self, cause: PruneCause, count: u64) {
        let slot = match cause {
            PruneCause::Infeasible => &mut self.infeasible,
            PruneCause::Optimality => &mut self.optimality,
            PruneCause::Completeness => &mut self.completeness,
        };
        *slot = slot.saturating_add(count);
    }

    pub fn total(&self) -> u64 {
        self.infeasible + self.optimality + self.completeness
    }
}

/// Statistics collected during one branch-and-bound run.
///
/// # Example
///
/// ```
/// use knapforge_solver::{PruneCause, SearchStatistics};
///
/// let mut stats = SearchStatistics::default();
/// stats.on_node_generated(1);
/// stats.on_node_generated(1);
/// stats.on_node_expanded();
/// stats.on_pruned(PruneCause::Infeasible);
///
/// assert_eq!(stats.nodes_generated, 2);
/// assert_eq!(stats.nodes_pruned.total(), 1);
/// assert_eq!(stats.max_depth, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Nodes popped from the frontier and branched on.
    pub nodes_expanded: u64,
    /// Nodes created, root included.
    pub nodes_generated: u64,
    /// Nodes discarded, by cause.
    pub nodes_pruned: PruneCounts,
    /// Nodes still waiting in the frontier when a limit stopped the search.
    pub nodes_open: u64,
    /// Times the search replaced the incumbent.
    pub incumbent_updates: u64,
    /// Deepest level of any generated node.
    pub max_depth: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_generated(&mut self, level: usize) {
        self.nodes_generated += 1;
        self.max_depth = self.max_depth.max(level);
    }

    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded += 1;
    }

    #[inline]
    pub fn on_pruned(&mut self, cause: PruneCause) {
        self.nodes_pruned.record(cause);
    }

    /// Records nodes abandoned unexplored by a termination limit.
    pub fn on_left_open(&mut self, count: u64) {
        self.nodes_open = self.nodes_open.saturating_add(count);
    }

    /// Expanded, pruned and open nodes together. Equals
    /// [`nodes_generated`](Self::nodes_generated) after every solve.
    pub fn nodes_accounted(&self) -> u64 {
        self.nodes_expanded + self.nodes_pruned.total() + self.nodes_open
    }

    #[inline]
    pub fn on_incumbent_improved(&mut self) {
        self.incumbent_updates += 1;
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: usize) {
        self.peak_frontier = self.peak_frontier.max(size);
    }

    /// Fraction of the full decision tree that was never expanded.
    ///
    /// The full tree over `project_count` binary decisions has
    /// `2^(project_count + 1) - 1` nodes. Returns 0 when there is nothing to
    /// decide.
    pub fn pruning_efficiency(&self, project_count: usize) -> f64 {
        if project_count == 0 {
            return 0.0;
        }
        let exponent = i32::try_from(project_count + 1).unwrap_or(i32::MAX);
        let full_tree = 2f64.powi(exponent) - 1.0;
        (1.0 - self.nodes_expanded as f64 / full_tree).clamp(0.0, 1.0)
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes expanded:        {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes generated:       {}", self.nodes_generated)?;
        writeln!(f, "  Pruned (infeasible):   {}", self.nodes_pruned.infeasible)?;
        writeln!(f, "  Pruned (optimality):   {}", self.nodes_pruned.optimality)?;
        writeln!(f, "  Pruned (completeness): {}", self.nodes_pruned.completeness)?;
        if self.nodes_open > 0 {
            writeln!(f, "  Left open by limit:    {}", self.nodes_open)?;
        }
        writeln!(f, "  Incumbent updates:     {}", self.incumbent_updates)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Peak frontier size:    {}", self.peak_frontier)?;
        Ok(())
    }
}
