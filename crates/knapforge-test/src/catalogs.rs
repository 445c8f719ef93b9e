//! Sample catalogs.

use knapforge_core::portfolio::retention_portfolio;
use knapforge_core::{Project, ProjectCatalog};

/// The four-item catalog with a known optimum of 100 at budget 300
/// (`item1` plus `item4`).
pub fn scenario_catalog() -> ProjectCatalog {
    catalog(vec![
        Project::new("item1", 100.0, 30.0),
        Project::new("item2", 150.0, 45.0),
        Project::new("item3", 80.0, 20.0),
        Project::new("item4", 200.0, 70.0),
    ])
}

/// The built-in 15-project retention portfolio.
pub fn retention_catalog() -> ProjectCatalog {
    catalog(retention_portfolio())
}

/// Builds a catalog from `(cost, impact)` pairs with ids `p0`, `p1`, ...
///
/// # Panics
///
/// Panics if a pair is rejected by catalog validation.
pub fn catalog_from(pairs: &[(f64, f64)]) -> ProjectCatalog {
    catalog(
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(cost, impact))| Project::new(format!("p{i}"), cost, impact))
            .collect(),
    )
}

/// A deterministic catalog of `size` projects with integral costs in
/// `10..=99` and impacts in `1..=40`, varied by `seed`.
pub fn generated_catalog(size: usize, seed: u64) -> ProjectCatalog {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move |modulus: u64| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) % modulus
    };

    let pairs: Vec<(f64, f64)> = (0..size)
        .map(|_| ((10 + next(90)) as f64, (1 + next(40)) as f64))
        .collect();
    catalog_from(&pairs)
}

fn catalog(projects: Vec<Project>) -> ProjectCatalog {
    match ProjectCatalog::new(projects) {
        Ok(catalog) => catalog,
        Err(e) => panic!("invalid fixture catalog: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_catalog_is_deterministic() {
        let a = generated_catalog(12, 7);
        let b = generated_catalog(12, 7);
        assert_eq!(a.projects(), b.projects());
        assert_eq!(a.len(), 12);
        assert!(a.projects().iter().all(|p| (10.0..=99.0).contains(&p.cost())));
        assert!(a.projects().iter().all(|p| (1.0..=40.0).contains(&p.impact())));
    }

    #[test]
    fn test_seeds_differ() {
        assert_ne!(
            generated_catalog(8, 1).projects(),
            generated_catalog(8, 2).projects()
        );
    }
}
