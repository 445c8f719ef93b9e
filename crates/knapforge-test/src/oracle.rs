//! Exhaustive reference solver.
//!
//! Enumerates every subset of the searchable projects. Exponential, so it
//! is only meant for small catalogs in tests.

use knapforge_core::{Budget, ProjectCatalog};

/// Largest searchable catalog [`brute_force`] accepts.
pub const MAX_ENUMERATED: usize = 20;

/// Best subset found by enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumerated {
    /// Impact including the forced zero-cost projects.
    pub impact: f64,
    pub cost: f64,
    /// Selected input positions, forced ones included, in input order.
    pub selection: Vec<usize>,
}

/// Returns a maximum-impact subset within `budget`.
///
/// Among subsets of equal impact the first in enumeration order wins.
///
/// # Panics
///
/// Panics if the catalog has more than [`MAX_ENUMERATED`] searchable
/// projects.
pub fn brute_force(catalog: &ProjectCatalog, budget: Budget) -> Enumerated {
    let ranked = catalog.ranked();
    assert!(
        ranked.len() <= MAX_ENUMERATED,
        "brute_force supports at most {MAX_ENUMERATED} projects, got {}",
        ranked.len()
    );

    let mut best_mask = 0u32;
    let mut best_impact = 0.0;
    let mut best_cost = 0.0;
    for mask in 0u32..(1 << ranked.len()) {
        let (cost, impact) = subset_totals(catalog, mask, 0);
        if budget.admits(cost) && impact > best_impact {
            best_mask = mask;
            best_impact = impact;
            best_cost = cost;
        }
    }

    let mut selection: Vec<usize> = (0..ranked.len())
        .filter(|bit| best_mask & (1 << bit) != 0)
        .map(|bit| ranked[bit].index)
        .chain(catalog.forced().iter().copied())
        .collect();
    selection.sort_unstable();

    Enumerated {
        impact: best_impact + catalog.forced_impact(),
        cost: best_cost,
        selection,
    }
}

/// Best impact of any feasible completion of a prefix that has decided the
/// first `level` ranked projects with the given running totals, or `None`
/// if the prefix is already over budget.
pub fn best_completion(
    catalog: &ProjectCatalog,
    budget: Budget,
    level: usize,
    included_cost: f64,
    included_impact: f64,
) -> Option<f64> {
    if !budget.admits(included_cost) {
        return None;
    }
    let remaining = catalog.ranked().len().saturating_sub(level);
    assert!(remaining <= MAX_ENUMERATED);

    let mut best = included_impact;
    for mask in 0u32..(1 << remaining) {
        let (cost, impact) = subset_totals(catalog, mask, level);
        if budget.admits(included_cost + cost) {
            best = f64::max(best, included_impact + impact);
        }
    }
    Some(best)
}

// Totals of the ranked projects `offset + bit` for every bit set in `mask`.
fn subset_totals(catalog: &ProjectCatalog, mask: u32, offset: usize) -> (f64, f64) {
    catalog.ranked()[offset..]
        .iter()
        .enumerate()
        .filter(|(bit, _)| mask & (1 << bit) != 0)
        .fold((0.0, 0.0), |(cost, impact), (_, p)| {
            (cost + p.cost, impact + p.impact)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::{catalog_from, scenario_catalog};

    #[test]
    fn test_scenario_optimum() {
        let best = brute_force(&scenario_catalog(), Budget::new(300.0).unwrap());
        assert_eq!(best.impact, 100.0);
        assert_eq!(best.cost, 300.0);
        assert_eq!(best.selection, vec![0, 3]);
    }

    #[test]
    fn test_zero_budget() {
        let best = brute_force(&scenario_catalog(), Budget::ZERO);
        assert_eq!(best.impact, 0.0);
        assert!(best.selection.is_empty());
    }

    #[test]
    fn test_best_completion() {
        let catalog = catalog_from(&[(10.0, 11.0), (100.0, 100.0)]);
        let budget = Budget::new(100.0).unwrap();

        // nothing decided
        assert_eq!(best_completion(&catalog, budget, 0, 0.0, 0.0), Some(100.0));
        // small project taken: large no longer fits
        assert_eq!(best_completion(&catalog, budget, 1, 10.0, 11.0), Some(11.0));
        assert_eq!(best_completion(&catalog, budget, 2, 110.0, 111.0), None);
    }
}
