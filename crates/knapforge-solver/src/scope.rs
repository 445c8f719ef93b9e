//! Per-solve scope.
//!
//! Holds what terminations get to look at: the clock and the counters of
//! the solve call in progress.

use std::time::{Duration, Instant};

use crate::stats::SearchStatistics;

/// State of one solve call, as seen by termination conditions.
#[derive(Debug, Clone)]
pub struct SolverScope {
    start_time: Instant,
    stats: SearchStatistics,
    frontier_len: usize,
    best_impact: f64,
}

impl SolverScope {
    /// Creates a scope and starts its clock.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            stats: SearchStatistics::default(),
            frontier_len: 0,
            best_impact: 0.0,
        }
    }

    /// Time since the scope was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn stats(&self) -> &SearchStatistics {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStatistics {
        &mut self.stats
    }

    pub fn nodes_expanded(&self) -> u64 {
        self.stats.nodes_expanded
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }

    pub fn best_impact(&self) -> f64 {
        self.best_impact
    }

    pub(crate) fn set_frontier_len(&mut self, len: usize) {
        self.frontier_len = len;
        self.stats.on_frontier_size(len);
    }

    pub(crate) fn set_best_impact(&mut self, impact: f64) {
        self.best_impact = impact;
    }

    pub(crate) fn into_stats(self) -> SearchStatistics {
        self.stats
    }
}

impl Default for SolverScope {
    fn default() -> Self {
        Self::new()
    }
}
