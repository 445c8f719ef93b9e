//! Best-first frontier.
//!
//! A max-heap of open nodes keyed on their bound. Equal bounds pop in
//! insertion order, so the expansion order is a pure function of the bounds
//! and the order nodes were pushed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::node::SearchNode;

/// A node wrapper for priority queue ordering.
#[derive(Debug)]
struct PriorityNode {
    sequence: u64,
    node: SearchNode,
}

impl Eq for PriorityNode {}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Better bound = higher priority; older entry wins ties.
        self.node
            .bound()
            .total_cmp(&other.node.bound())
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open nodes, highest bound first.
///
/// # Example
///
/// ```
/// use knapforge_solver::{Frontier, SearchNode};
///
/// let mut frontier = Frontier::new();
/// for bound in [3.0, 9.0, 5.0] {
///     let mut node = SearchNode::root();
///     node.set_bound(bound);
///     frontier.push(node);
/// }
///
/// assert_eq!(frontier.peek_bound(), Some(9.0));
/// assert_eq!(frontier.pop().unwrap().bound(), 9.0);
/// assert_eq!(frontier.pop().unwrap().bound(), 5.0);
/// assert_eq!(frontier.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<PriorityNode>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bounded node.
    pub fn push(&mut self, node: SearchNode) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(PriorityNode { sequence, node });
    }

    /// Removes and returns the node with the highest bound.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    /// Bound of the node that `pop` would return.
    pub fn peek_bound(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.node.bound())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Discards every open node and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.heap.len();
        self.heap.clear();
        dropped
    }
}
