//! Immutable, ratio-ordered project catalog.
//!
//! The catalog is built once per run and never mutated. It keeps the
//! projects in their input order (for reporting) and exposes a second,
//! ranked view of the searchable projects sorted by impact-to-cost ratio.
//! Both the fractional bound and the greedy heuristic walk that ranked view.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::project::{Project, ProjectId};
use crate::error::{KnapforgeError, Result};

/// A searchable project as seen by the search: its input position plus the
/// two numbers the search needs. Copies of these are cheap; the project
/// itself is never copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedProject {
    /// Position of the project in the catalog's input order.
    pub index: usize,
    pub cost: f64,
    pub impact: f64,
}

impl RankedProject {
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.impact / self.cost
    }
}

/// The set of candidate projects for one run.
///
/// Construction validates every entry and splits the projects in three:
/// - **ranked**: positive-cost projects, sorted by descending impact/cost
///   ratio, ties broken by lower cost first, then by input order;
/// - **forced**: zero-cost projects with positive impact, which belong to
///   every optimal solution and are removed from the search;
/// - zero-cost, zero-impact projects, which can never matter and are
///   neither searched nor selected.
///
/// # Example
///
/// ```
/// use knapforge_core::{Project, ProjectCatalog};
///
/// let catalog = ProjectCatalog::new(vec![
///     Project::new("a", 100.0, 30.0),
///     Project::new("b", 150.0, 45.0),
///     Project::new("c", 80.0, 20.0),
///     Project::new("d", 200.0, 70.0),
/// ]).unwrap();
///
/// let order: Vec<&str> = catalog
///     .ranked()
///     .iter()
///     .map(|r| catalog.project(r.index).id().as_str())
///     .collect();
/// assert_eq!(order, ["d", "a", "b", "c"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
    ranked: Vec<RankedProject>,
    forced: Vec<usize>,
}

impl ProjectCatalog {
    /// Validates `projects` and builds the ranked view.
    ///
    /// # Errors
    ///
    /// Fails on an empty or duplicate identifier, on a NaN or infinite cost
    /// or impact, and on a negative cost or impact.
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        validate(&projects)?;

        let mut ranked = Vec::new();
        let mut forced = Vec::new();
        for (index, project) in projects.iter().enumerate() {
            if project.cost() > 0.0 {
                ranked.push(RankedProject {
                    index,
                    cost: project.cost(),
                    impact: project.impact(),
                });
            } else if project.impact() > 0.0 {
                forced.push(index);
            }
        }
        ranked.sort_by(rank_order);

        Ok(Self {
            projects,
            ranked,
            forced,
        })
    }

    /// Creates a catalog with no projects.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of projects in the input, searchable or not.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects in input order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The project at input position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn project(&self, index: usize) -> &Project {
        &self.projects[index]
    }

    /// Searchable projects in ratio order.
    pub fn ranked(&self) -> &[RankedProject] {
        &self.ranked
    }

    /// Number of projects the search has to decide on.
    pub fn searchable_len(&self) -> usize {
        self.ranked.len()
    }

    /// Input positions of the zero-cost projects that are always selected.
    pub fn forced(&self) -> &[usize] {
        &self.forced
    }

    /// Total impact contributed by the forced projects.
    pub fn forced_impact(&self) -> f64 {
        self.forced
            .iter()
            .map(|&i| self.projects[i].impact())
            .sum()
    }

    /// Looks up a project by identifier, returning its input position.
    pub fn find(&self, id: &str) -> Option<(usize, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .find(|(_, p)| p.id().as_str() == id)
    }

    /// Sum of all project costs.
    pub fn total_cost(&self) -> f64 {
        self.projects.iter().map(Project::cost).sum()
    }

    /// Sum of all project impacts.
    pub fn total_impact(&self) -> f64 {
        self.projects.iter().map(Project::impact).sum()
    }
}

fn validate(projects: &[Project]) -> Result<()> {
    let mut seen: HashSet<&ProjectId> = HashSet::with_capacity(projects.len());

    for (position, project) in projects.iter().enumerate() {
        let id = project.id();
        if id.is_empty() {
            return Err(KnapforgeError::EmptyProjectId(position));
        }
        for (field, value) in [("cost", project.cost()), ("impact", project.impact())] {
            if !value.is_finite() {
                return Err(KnapforgeError::NonFiniteValue {
                    id: id.clone(),
                    field,
                    value,
                });
            }
        }
        if project.cost() < 0.0 {
            return Err(KnapforgeError::NegativeCost {
                id: id.clone(),
                cost: project.cost(),
            });
        }
        if project.impact() < 0.0 {
            return Err(KnapforgeError::NegativeImpact {
                id: id.clone(),
                impact: project.impact(),
            });
        }
        if !seen.insert(id) {
            return Err(KnapforgeError::DuplicateProjectId(id.clone()));
        }
    }
    Ok(())
}

// Descending ratio, then ascending cost, then input order.
fn rank_order(a: &RankedProject, b: &RankedProject) -> Ordering {
    b.ratio()
        .total_cmp(&a.ratio())
        .then_with(|| a.cost.total_cmp(&b.cost))
        .then_with(|| a.index.cmp(&b.index))
}
