//! Report rendering and colored diagnostics.
//!
//! Data goes to the writer handed in by the caller; diagnostics go to stderr.

use std::io::{self, Write};

use knapforge_core::ProjectCatalog;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow(), msg);
}

/// How a catalog entry takes part in the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Branched on, in rank order.
    Searched,
    /// Free with positive impact: always selected.
    Forced,
    /// Free with no impact: never selected.
    Ignored,
}

/// One row of `knapforge catalog`.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub id: &'a str,
    pub label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    pub cost: f64,
    pub impact: f64,
    pub efficiency: f64,
    pub role: Role,
}

/// Lists searched projects by rank, then forced, then ignored ones.
pub fn catalog_entries(catalog: &ProjectCatalog) -> Vec<CatalogEntry<'_>> {
    let entry = |index: usize, rank: Option<usize>, role: Role| {
        let project = catalog.project(index);
        CatalogEntry {
            rank,
            id: project.id().as_str(),
            label: project.label(),
            category: project.category(),
            cost: project.cost(),
            impact: project.impact(),
            efficiency: project.efficiency(),
            role,
        }
    };

    let mut placed = vec![false; catalog.len()];
    let mut rows: Vec<(usize, Option<usize>, Role)> = Vec::with_capacity(catalog.len());
    for (rank, ranked) in catalog.ranked().iter().enumerate() {
        rows.push((ranked.index, Some(rank + 1), Role::Searched));
    }
    for &index in catalog.forced() {
        rows.push((index, None, Role::Forced));
    }
    for &(index, _, _) in &rows {
        placed[index] = true;
    }
    for (index, placed) in placed.into_iter().enumerate() {
        if !placed {
            rows.push((index, None, Role::Ignored));
        }
    }

    rows.into_iter()
        .map(|(index, rank, role)| entry(index, rank, role))
        .collect()
}

/// Writes the catalog as an aligned table.
pub fn write_catalog(out: &mut dyn Write, catalog: &ProjectCatalog) -> io::Result<()> {
    writeln!(
        out,
        "{:>4}  {:<36} {:<14} {:>10} {:>8} {:>10}",
        "rank", "project", "category", "cost", "impact", "impact/$"
    )?;
    for entry in catalog_entries(catalog) {
        let rank = match (entry.rank, entry.role) {
            (Some(rank), _) => rank.to_string(),
            (None, Role::Forced) => "free".to_string(),
            (None, _) => "-".to_string(),
        };
        writeln!(
            out,
            "{:>4}  {:<36} {:<14} {:>10.2} {:>8.2} {:>10.4}",
            rank,
            entry.label,
            entry.category.unwrap_or("-"),
            entry.cost,
            entry.impact,
            entry.efficiency
        )?;
    }
    writeln!(
        out,
        "\n{} projects, total cost {:.2}, total impact {:.2}",
        catalog.len(),
        catalog.total_cost(),
        catalog.total_impact()
    )
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> crate::CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
