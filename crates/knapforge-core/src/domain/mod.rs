//! Domain model: projects, budgets and the ratio-ordered catalog.

mod budget;
mod catalog;
mod project;

pub use budget::Budget;
pub use catalog::{ProjectCatalog, RankedProject};
pub use project::{Project, ProjectId};

#[cfg(test)]
mod tests;
