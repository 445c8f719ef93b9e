//! Incumbent tracking.
//!
//! The best complete selection found so far. Owned by a single solve call;
//! it only ever takes part in pruning comparisons, never in bounding.

use crate::greedy::GreedySolution;
use crate::node::{SearchNode, Selection};

/// Where the current incumbent came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncumbentSource {
    /// Nothing selected yet.
    Empty,
    /// Seeded from the greedy heuristic.
    Heuristic,
    /// Found by the search.
    Search,
}

/// Best complete selection found so far (searchable projects only).
#[derive(Debug, Clone)]
pub struct Incumbent {
    impact: f64,
    cost: f64,
    selection: Selection,
    source: IncumbentSource,
}

impl Incumbent {
    /// The empty selection: impact 0.
    pub fn empty() -> Self {
        Self {
            impact: 0.0,
            cost: 0.0,
            selection: Selection::new(),
            source: IncumbentSource::Empty,
        }
    }

    /// Seeds from a greedy solution.
    pub fn from_greedy(greedy: &GreedySolution) -> Self {
        Self {
            impact: greedy.searched_impact(),
            cost: greedy.total_cost(),
            selection: greedy.selection().iter().copied().collect(),
            source: IncumbentSource::Heuristic,
        }
    }

    #[inline]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn source(&self) -> IncumbentSource {
        self.source
    }

    /// Installs `leaf` if it strictly improves on the current impact.
    ///
    /// Returns true if the incumbent changed.
    pub fn try_improve(&mut self, leaf: SearchNode) -> bool {
        if leaf.included_impact() <= self.impact {
            return false;
        }
        self.impact = leaf.included_impact();
        self.cost = leaf.included_cost();
        self.selection = leaf.into_selection();
        self.source = IncumbentSource::Search;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapforge_core::RankedProject;

    fn leaf(index: usize, cost: f64, impact: f64) -> SearchNode {
        SearchNode::root().include(&RankedProject {
            index,
            cost,
            impact,
        })
    }

    #[test]
    fn test_improves_only_strictly() {
        let mut incumbent = Incumbent::empty();
        assert_eq!(incumbent.source(), IncumbentSource::Empty);

        assert!(incumbent.try_improve(leaf(2, 10.0, 5.0)));
        assert_eq!(incumbent.impact(), 5.0);
        assert_eq!(incumbent.selection(), &[2]);
        assert_eq!(incumbent.source(), IncumbentSource::Search);

        assert!(!incumbent.try_improve(leaf(3, 1.0, 5.0)));
        assert_eq!(incumbent.selection(), &[2]);
    }

    #[test]
    fn test_zero_impact_leaf_does_not_replace_empty() {
        let mut incumbent = Incumbent::empty();
        assert!(!incumbent.try_improve(leaf(0, 1.0, 0.0)));
        assert!(incumbent.selection().is_empty());
    }
}
