//! Search tree node representation.
//!
//! Each node describes one decision prefix over the ratio-ordered catalog.
//! Nodes are transient values: they live in the frontier until expanded or
//! pruned and carry their own selection, so no parent links are needed.

use knapforge_core::RankedProject;
use smallvec::SmallVec;

/// Input positions of the projects included along a decision path.
pub type Selection = SmallVec<[usize; 16]>;

/// A node in the branch-and-bound tree.
///
/// Each node contains:
/// - The level: index of the next undecided project in ratio order
/// - Running cost and impact of the included projects
/// - An upper bound on the impact reachable from this node
/// - The included projects themselves
/// Bound of a node that has not been bounded yet. Infinity is a trivially
/// valid upper bound.
const UNBOUNDED: f64 = f64::INFINITY;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    level: usize,
    included_cost: f64,
    included_impact: f64,
    /// [`UNBOUNDED`] until bounded.
    bound: f64,
    selection: Selection,
}

impl SearchNode {
    /// Creates the root node: nothing decided, nothing included.
    pub fn root() -> Self {
        Self {
            level: 0,
            included_cost: 0.0,
            included_impact: 0.0,
            bound: UNBOUNDED,
            selection: Selection::new(),
        }
    }

    /// Creates the child that includes `project`, the project at this level.
    pub fn include(&self, project: &RankedProject) -> Self {
        let mut selection = self.selection.clone();
        selection.push(project.index);
        Self {
            level: self.level + 1,
            included_cost: self.included_cost + project.cost,
            included_impact: self.included_impact + project.impact,
            bound: UNBOUNDED,
            selection,
        }
    }

    /// Turns this node into the child that skips the project at this level.
    pub fn into_exclude(self) -> Self {
        Self {
            level: self.level + 1,
            bound: UNBOUNDED,
            ..self
        }
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn included_cost(&self) -> f64 {
        self.included_cost
    }

    #[inline]
    pub fn included_impact(&self) -> f64 {
        self.included_impact
    }

    #[inline]
    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn set_bound(&mut self, bound: f64) {
        self.bound = bound;
    }

    /// Returns whether a bound has been computed for this node.
    pub fn is_bounded(&self) -> bool {
        self.bound != UNBOUNDED
    }

    /// Input positions of the included projects, in decision order.
    #[inline]
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub(crate) fn into_selection(self) -> Selection {
        self.selection
    }

    /// Returns whether every project has been decided.
    pub fn is_leaf(&self, project_count: usize) -> bool {
        self.level >= project_count
    }
}
