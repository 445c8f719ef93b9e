//! Shared test fixtures for knapforge crates.
//!
//! This crate provides sample catalogs and an exhaustive reference solver.
//! It depends on `knapforge-core` only, so the solver crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`catalogs`] - the four-item scenario, the retention portfolio, generated catalogs
//! - [`oracle`] - brute-force enumeration of every subset
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! knapforge-test = { workspace = true }
//! ```
//!
//! ```
//! use knapforge_core::Budget;
//! use knapforge_test::{brute_force, scenario_catalog};
//!
//! let best = brute_force(&scenario_catalog(), Budget::new(300.0).unwrap());
//! assert_eq!(best.impact, 100.0);
//! ```

pub mod catalogs;
pub mod oracle;

pub use catalogs::{catalog_from, generated_catalog, retention_catalog, scenario_catalog};
pub use oracle::{best_completion, brute_force, Enumerated, MAX_ENUMERATED};
