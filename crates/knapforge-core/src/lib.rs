//! Core types for knapforge.
//!
//! This crate provides the data model shared by the solver crates:
//! - [`Project`] and [`ProjectId`]: one candidate investment with a cost and an impact
//! - [`Budget`]: the validated spending cap supplied at solve time
//! - [`ProjectCatalog`]: the immutable, ratio-ordered view the search walks
//! - [`KnapforgeError`]: input validation failures
//! - [`portfolio`]: the built-in retention portfolio

pub mod domain;
pub mod error;
pub mod portfolio;

pub use domain::{Budget, Project, ProjectCatalog, ProjectId, RankedProject};
pub use error::{KnapforgeError, Result};
