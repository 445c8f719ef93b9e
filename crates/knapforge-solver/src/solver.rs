//! Best-first branch-and-bound solver.
//!
//! One call to [`BranchAndBoundSolver::solve`] owns its frontier, incumbent
//! and counters. Nothing is shared between calls, so a single solver value
//! can serve many budgets, sequentially or from several threads.

use knapforge_config::SolverConfig;
use knapforge_core::{Budget, ProjectCatalog, RankedProject};
use tracing::{debug, info, trace};

use crate::bound::BoundCalculator;
use crate::event::{NoOpListener, SearchListener};
use crate::frontier::Frontier;
use crate::greedy::GreedyHeuristic;
use crate::incumbent::Incumbent;
use crate::node::SearchNode;
use crate::pruner::{self, PruneCause};
use crate::scope::SolverScope;
use crate::solution::{Solution, SolveStatus};
use crate::termination::{
    NoTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};

/// Expansions between two `progress` events.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Lifecycle of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// Root built, incumbent seeded.
    Initialized,
    /// Popping and expanding frontier nodes.
    Running,
    /// The frontier is exhausted or cannot beat the incumbent; the
    /// incumbent is optimal.
    Converged,
    /// A termination limit stopped the search first.
    Terminated,
}

/// Termination built by [`BranchAndBoundSolver::from_config`]: an optional
/// node ceiling OR an optional time ceiling.
pub type ConfiguredTermination =
    OrTermination<(Option<NodeCountTermination>, Option<TimeTermination>)>;

/// Exact solver for budgeted project selection.
///
/// # Type Parameters
/// * `T` - Termination condition checked before every expansion
///
/// # Example
///
/// ```
/// use knapforge_core::{Budget, Project, ProjectCatalog};
/// use knapforge_solver::BranchAndBoundSolver;
///
/// let catalog = ProjectCatalog::new(vec![
///     Project::new("item1", 100.0, 30.0),
///     Project::new("item2", 150.0, 45.0),
///     Project::new("item3", 80.0, 20.0),
///     Project::new("item4", 200.0, 70.0),
/// ]).unwrap();
///
/// let solution = BranchAndBoundSolver::new().solve(&catalog, Budget::new(300.0).unwrap());
///
/// assert!(solution.is_optimal());
/// assert_eq!(solution.total_impact, 100.0);
/// assert_eq!(solution.total_cost, 300.0);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver<T = NoTermination> {
    warm_start: bool,
    termination: T,
}

impl BranchAndBoundSolver<NoTermination> {
    /// Creates a solver with greedy warm start and no termination limit.
    pub fn new() -> Self {
        Self {
            warm_start: true,
            termination: NoTermination,
        }
    }
}

impl Default for BranchAndBoundSolver<NoTermination> {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchAndBoundSolver<ConfiguredTermination> {
    /// Creates a solver from configuration.
    pub fn from_config(config: &SolverConfig) -> Self {
        let termination = OrTermination((
            config.node_limit().map(NodeCountTermination::new),
            config.time_limit().map(TimeTermination::new),
        ));
        Self {
            warm_start: config.warm_start,
            termination,
        }
    }
}

impl<T> BranchAndBoundSolver<T> {
    /// Enables or disables seeding the incumbent with the greedy heuristic.
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Replaces the termination condition.
    pub fn with_termination<U: Termination>(self, termination: U) -> BranchAndBoundSolver<U> {
        BranchAndBoundSolver {
            warm_start: self.warm_start,
            termination,
        }
    }

    pub fn warm_start(&self) -> bool {
        self.warm_start
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }
}

impl<T: Termination> BranchAndBoundSolver<T> {
    /// Finds the maximum-impact selection within `budget`.
    pub fn solve(&self, catalog: &ProjectCatalog, budget: Budget) -> Solution {
        self.solve_with_listener(catalog, budget, &mut NoOpListener)
    }

    /// Like [`solve`](Self::solve), reporting search events to `listener`.
    pub fn solve_with_listener<L: SearchListener>(
        &self,
        catalog: &ProjectCatalog,
        budget: Budget,
        listener: &mut L,
    ) -> Solution {
        let scope = SolverScope::new();

        info!(
            event = "solve_start",
            project_count = catalog.len(),
            searchable_count = catalog.searchable_len(),
            forced_count = catalog.forced().len(),
            budget = budget.value(),
            warm_start = self.warm_start,
        );

        let greedy = GreedyHeuristic::solve(catalog, budget);
        let incumbent = if self.warm_start {
            debug!(
                event = "warm_start",
                heuristic_impact = greedy.searched_impact(),
                heuristic_cost = greedy.total_cost(),
            );
            Incumbent::from_greedy(&greedy)
        } else {
            Incumbent::empty()
        };

        let mut search = Search::new(catalog, budget, incumbent, scope, listener);
        let status = search.run(&self.termination);
        let Search {
            incumbent, scope, ..
        } = search;

        let duration = scope.elapsed();
        let statistics = scope.into_stats();
        let mut indices = incumbent.selection().to_vec();
        indices.extend_from_slice(catalog.forced());
        let total_impact = incumbent.impact() + catalog.forced_impact();

        info!(
            event = "solve_end",
            status = %status,
            total_impact,
            total_cost = incumbent.cost(),
            nodes_expanded = statistics.nodes_expanded,
            nodes_pruned = statistics.nodes_pruned.total(),
            nodes_open = statistics.nodes_open,
            duration_ms = duration.as_millis() as u64,
        );

        Solution::assemble(
            catalog,
            budget,
            indices,
            incumbent.cost(),
            total_impact,
            status,
            statistics,
            &greedy,
            duration,
        )
    }
}

/// Mutable state of one solve call.
struct Search<'a, 'l, L> {
    ranked: &'a [RankedProject],
    budget: Budget,
    bounds: BoundCalculator<'a>,
    frontier: Frontier,
    incumbent: Incumbent,
    scope: SolverScope,
    state: SolverState,
    listener: &'l mut L,
}

impl<'a, 'l, L: SearchListener> Search<'a, 'l, L> {
    fn new(
        catalog: &'a ProjectCatalog,
        budget: Budget,
        incumbent: Incumbent,
        mut scope: SolverScope,
        listener: &'l mut L,
    ) -> Self {
        scope.set_best_impact(incumbent.impact());
        listener.on_state_changed(SolverState::Initialized);
        Self {
            ranked: catalog.ranked(),
            budget,
            bounds: BoundCalculator::new(catalog, budget),
            frontier: Frontier::new(),
            incumbent,
            scope,
            state: SolverState::Initialized,
            listener,
        }
    }

    fn run<T: Termination>(&mut self, termination: &T) -> SolveStatus {
        let root = SearchNode::root();
        self.scope.stats_mut().on_node_generated(root.level());
        self.offer(root);
        self.transition(SolverState::Running);

        while let Some(node) = self.frontier.pop() {
            // Best-first: nothing left in the frontier can beat this bound.
            if pruner::is_dominated(node.bound(), self.incumbent.impact()) {
                let discarded = 1 + self.frontier.clear() as u64;
                self.listener.on_node_pruned(&node, PruneCause::Optimality);
                self.scope
                    .stats_mut()
                    .nodes_pruned
                    .record_many(PruneCause::Optimality, discarded);
                debug!(
                    event = "frontier_exhausted",
                    bound = node.bound(),
                    incumbent = self.incumbent.impact(),
                    discarded,
                );
                break;
            }
            if termination.is_terminated(&self.scope) {
                let open = 1 + self.frontier.clear() as u64;
                self.scope.stats_mut().on_left_open(open);
                debug!(event = "limit_reached", open);
                self.transition(SolverState::Terminated);
                return SolveStatus::LimitReached;
            }
            self.expand(node);
        }

        self.transition(SolverState::Converged);
        SolveStatus::Optimal
    }

    fn expand(&mut self, node: SearchNode) {
        self.scope.stats_mut().on_node_expanded();
        trace!(
            event = "expand",
            level = node.level(),
            bound = node.bound(),
            included_cost = node.included_cost(),
            included_impact = node.included_impact(),
        );

        let project = self.ranked[node.level()];
        let include = node.include(&project);
        self.scope.stats_mut().on_node_generated(include.level());
        if pruner::is_infeasible(include.included_cost(), self.budget) {
            self.prune(&include, PruneCause::Infeasible);
        } else {
            self.offer(include);
        }

        let exclude = node.into_exclude();
        self.scope.stats_mut().on_node_generated(exclude.level());
        self.offer(exclude);

        self.scope.set_frontier_len(self.frontier.len());

        let expanded = self.scope.nodes_expanded();
        if expanded % PROGRESS_INTERVAL == 0 {
            debug!(
                event = "progress",
                nodes_expanded = expanded,
                frontier_len = self.frontier.len(),
                best_impact = self.incumbent.impact(),
            );
        }
    }

    /// Bounds a feasible child and either records it as a leaf, prunes it,
    /// or pushes it onto the frontier.
    fn offer(&mut self, mut child: SearchNode) {
        child.set_bound(self.bounds.bound_for(&child));

        if pruner::is_complete(child.level(), self.ranked.len()) {
            self.prune(&child, PruneCause::Completeness);
            self.record_leaf(child);
        } else if pruner::is_dominated(child.bound(), self.incumbent.impact()) {
            self.prune(&child, PruneCause::Optimality);
        } else {
            self.listener.on_node_admitted(&child);
            self.frontier.push(child);
        }
    }

    fn record_leaf(&mut self, leaf: SearchNode) {
        let impact = leaf.included_impact();
        let depth = leaf.level();
        if !self.incumbent.try_improve(leaf) {
            return;
        }

        let nodes_expanded = self.scope.nodes_expanded();
        self.scope.stats_mut().on_incumbent_improved();
        self.scope.set_best_impact(impact);
        debug!(event = "new_incumbent", impact, nodes_expanded, depth);
        self.listener.on_incumbent_improved(impact, nodes_expanded);
    }

    fn prune(&mut self, node: &SearchNode, cause: PruneCause) {
        self.scope.stats_mut().on_pruned(cause);
        self.listener.on_node_pruned(node, cause);
    }

    fn transition(&mut self, state: SolverState) {
        debug!(event = "state", from = ?self.state, to = ?state);
        self.state = state;
        self.listener.on_state_changed(state);
    }
}
