//! Property tests for the branch-and-bound solver, checked against the
//! brute-force oracle on small integral catalogs.

use knapforge_core::{Budget, ProjectCatalog};
use knapforge_solver::{
    BranchAndBoundSolver, NodeCountTermination, PruneCause, SearchListener, SearchNode, Solution,
};
use knapforge_test::{best_completion, brute_force, catalog_from};
use proptest::prelude::*;

fn catalog_strategy() -> impl Strategy<Value = ProjectCatalog> {
    prop::collection::vec((0u32..100, 0u32..50), 0..=12).prop_map(|pairs| {
        let pairs: Vec<(f64, f64)> = pairs
            .into_iter()
            .map(|(cost, impact)| (cost as f64, impact as f64))
            .collect();
        catalog_from(&pairs)
    })
}

fn budget_strategy() -> impl Strategy<Value = Budget> {
    (0u32..600).prop_map(|b| Budget::new(b as f64).unwrap())
}

fn ids(solution: &Solution) -> Vec<String> {
    solution.selected.iter().map(|p| p.id.to_string()).collect()
}

/// Every node the solver bounded: frontier admissions, and nodes discarded
/// by the optimality or completeness checks. Infeasible children are never
/// bounded and are left out.
#[derive(Debug, Default)]
struct BoundedNodes(Vec<(usize, f64, f64, f64)>);

impl BoundedNodes {
    fn record(&mut self, node: &SearchNode) {
        self.0.push((
            node.level(),
            node.included_cost(),
            node.included_impact(),
            node.bound(),
        ));
    }
}

impl SearchListener for BoundedNodes {
    fn on_node_admitted(&mut self, node: &SearchNode) {
        self.record(node);
    }

    fn on_node_pruned(&mut self, node: &SearchNode, cause: PruneCause) {
        if cause != PruneCause::Infeasible {
            self.record(node);
        }
    }
}

proptest! {
    #[test]
    fn optimal_matches_brute_force(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solution = BranchAndBoundSolver::new().solve(&catalog, budget);
        let best = brute_force(&catalog, budget);

        prop_assert!(solution.is_optimal());
        prop_assert_eq!(solution.total_impact, best.impact);
    }

    #[test]
    fn cold_start_matches_brute_force(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solution = BranchAndBoundSolver::new().with_warm_start(false).solve(&catalog, budget);
        prop_assert_eq!(solution.total_impact, brute_force(&catalog, budget).impact);
    }

    #[test]
    fn solutions_are_feasible(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solution = BranchAndBoundSolver::new().solve(&catalog, budget);

        prop_assert!(solution.total_cost <= budget.value());
        prop_assert!(solution.validate(&catalog).is_ok());
    }

    #[test]
    fn impact_is_monotone_in_budget(
        catalog in catalog_strategy(),
        low in 0u32..600,
        extra in 0u32..200,
    ) {
        let solver = BranchAndBoundSolver::new();
        let smaller = solver.solve(&catalog, Budget::new(low as f64).unwrap());
        let larger = solver.solve(&catalog, Budget::new((low + extra) as f64).unwrap());

        prop_assert!(smaller.total_impact <= larger.total_impact);
    }

    #[test]
    fn never_worse_than_greedy(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solution = BranchAndBoundSolver::new().with_warm_start(false).solve(&catalog, budget);

        prop_assert!(solution.total_impact >= solution.heuristic.heuristic_impact);
        prop_assert!(solution.heuristic.improvement_over_heuristic >= 0.0);
    }

    #[test]
    fn repeated_solves_are_identical(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solver = BranchAndBoundSolver::new();
        let first = solver.solve(&catalog, budget);
        let second = solver.solve(&catalog, budget);

        prop_assert_eq!(ids(&first), ids(&second));

        let mut first = serde_json::to_value(&first).unwrap();
        let mut second = serde_json::to_value(&second).unwrap();
        first.as_object_mut().unwrap().remove("duration_ms");
        second.as_object_mut().unwrap().remove("duration_ms");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_generated_node_is_accounted_for(catalog in catalog_strategy(), budget in budget_strategy()) {
        let solution = BranchAndBoundSolver::new().with_warm_start(false).solve(&catalog, budget);
        let stats = solution.statistics;

        prop_assert_eq!(
            stats.nodes_generated,
            stats.nodes_expanded + stats.nodes_pruned.total()
        );
        prop_assert_eq!(stats.nodes_open, 0);
        prop_assert!(solution.pruning_efficiency >= 0.0 && solution.pruning_efficiency <= 1.0);
    }

    #[test]
    fn limit_stops_account_for_open_nodes(
        catalog in catalog_strategy(),
        budget in budget_strategy(),
        limit in 1u64..6,
    ) {
        let solution = BranchAndBoundSolver::new()
            .with_warm_start(false)
            .with_termination(NodeCountTermination::new(limit))
            .solve(&catalog, budget);
        let stats = solution.statistics;

        prop_assert_eq!(stats.nodes_generated, stats.nodes_accounted());
        prop_assert!(stats.nodes_expanded <= limit);
        if solution.is_optimal() {
            prop_assert_eq!(stats.nodes_open, 0);
        } else {
            prop_assert!(stats.nodes_open >= 1);
        }
        prop_assert!(solution.validate(&catalog).is_ok());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bounds_cover_best_completion(
        catalog in catalog_strategy(),
        budget in budget_strategy(),
        warm_start in any::<bool>(),
    ) {
        let mut bounded = BoundedNodes::default();
        BranchAndBoundSolver::new()
            .with_warm_start(warm_start)
            .solve_with_listener(&catalog, budget, &mut bounded);

        for (level, cost, impact, bound) in bounded.0 {
            let best = best_completion(&catalog, budget, level, cost, impact);
            prop_assert!(best.is_some(), "bounded node over budget at level {}", level);
            let best = best.unwrap_or_default();
            prop_assert!(
                bound + 1e-9 >= best,
                "bound {} below best completion {} at level {}",
                bound, best, level
            );
        }
    }
}

#[test]
fn scenario_from_the_reference_enumeration() {
    let catalog = knapforge_test::scenario_catalog();
    let solution = BranchAndBoundSolver::new().solve(&catalog, Budget::new(300.0).unwrap());

    assert_eq!(ids(&solution), ["item1", "item4"]);
    assert_eq!(solution.total_cost, 300.0);
    assert_eq!(solution.total_impact, 100.0);
}

#[test]
fn retention_portfolio_at_default_budget() {
    let catalog = knapforge_test::retention_catalog();
    let budget = Budget::new(300.0).unwrap();
    let solution = BranchAndBoundSolver::new().solve(&catalog, budget);

    assert!(solution.is_optimal());
    assert_eq!(solution.total_impact, brute_force(&catalog, budget).impact);
    assert!(solution.nodes_expanded() < (1 << 16));
    solution.validate(&catalog).unwrap();
}

#[test]
fn generated_catalogs_match_brute_force() {
    for seed in 0..20 {
        let catalog = knapforge_test::generated_catalog(16, seed);
        let budget = Budget::new(250.0).unwrap();
        let solution = BranchAndBoundSolver::new().solve(&catalog, budget);

        assert_eq!(
            solution.total_impact,
            brute_force(&catalog, budget).impact,
            "seed {seed}"
        );
    }
}
