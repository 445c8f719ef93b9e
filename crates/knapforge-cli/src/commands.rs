//! Subcommand execution.

use std::io::Write;
use std::path::Path;

use clap::CommandFactory;
use knapforge_config::{SolverConfig, DEFAULT_CONFIG_FILE};
use knapforge_core::Budget;
use knapforge_solver::{BranchAndBoundSolver, BudgetRange, SensitivityAnalyzer};

use crate::args::{Cli, Commands, InputArgs, OutputFormat, SolverArgs};
use crate::error::CliResult;
use crate::input::load_catalog;
use crate::output;

/// Runs the parsed command, writing its report to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    match &cli.command {
        Commands::Solve {
            budget,
            input,
            solver,
        } => solve(cli, *budget, input, solver, out),
        Commands::Sensitivity {
            from,
            to,
            step,
            parallel,
            input,
            solver,
        } => {
            let range = BudgetRange::new(*from, *to, *step)?;
            sensitivity(cli, &range, *parallel, input, solver, out)
        }
        Commands::Catalog { input } => catalog(input, out),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, out);
            Ok(())
        }
    }
}

/// Reads the configuration file and applies command-line overrides.
///
/// An explicit `--config` must exist; `knapforge.toml` in the working
/// directory is used only when present.
pub fn resolve_config(config: Option<&Path>, overrides: &SolverArgs) -> CliResult<SolverConfig> {
    let mut resolved = match config {
        Some(path) => SolverConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => SolverConfig::load(DEFAULT_CONFIG_FILE)?,
        None => SolverConfig::default(),
    };

    if overrides.no_warm_start {
        resolved = resolved.with_warm_start(false);
    }
    if let Some(limit) = overrides.node_limit {
        resolved = resolved.with_node_limit(limit);
    }
    if let Some(millis) = overrides.time_limit_ms {
        resolved = resolved.with_termination_millis(millis);
    }
    Ok(resolved)
}

fn solve(
    cli: &Cli,
    budget: f64,
    input: &InputArgs,
    overrides: &SolverArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let budget = Budget::new(budget)?;
    let catalog = load_catalog(input.catalog.as_deref())?;
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    let solution = BranchAndBoundSolver::from_config(&config).solve(&catalog, budget);
    if !solution.is_optimal() {
        output::warning("search limit reached; the selection is not proven optimal");
    }

    match input.format {
        OutputFormat::Text => write!(out, "{solution}")?,
        OutputFormat::Json => output::write_json(out, &solution)?,
    }
    Ok(())
}

fn sensitivity(
    cli: &Cli,
    range: &BudgetRange,
    parallel: bool,
    input: &InputArgs,
    overrides: &SolverArgs,
    out: &mut dyn Write,
) -> CliResult<()> {
    let catalog = load_catalog(input.catalog.as_deref())?;
    let mut config = resolve_config(cli.config.as_deref(), overrides)?;
    if parallel {
        config = config.with_parallel_sensitivity(true);
    }

    let report = SensitivityAnalyzer::from_config(&config).analyze(&catalog, &range.budgets());
    if !report.is_optimal() {
        output::warning("search limit reached at some budgets; those points are not proven optimal");
    }

    match input.format {
        OutputFormat::Text => {
            write!(out, "{report}")?;
            if let Some(best) = report.best_marginal() {
                writeln!(
                    out,
                    "\nHighest marginal impact: {:.4} per unit at budget {:.2}",
                    best.marginal_impact_per_unit.unwrap_or_default(),
                    best.budget.value()
                )?;
            }
        }
        OutputFormat::Json => output::write_json(out, &report)?,
    }
    Ok(())
}

fn catalog(input: &InputArgs, out: &mut dyn Write) -> CliResult<()> {
    let catalog = load_catalog(input.catalog.as_deref())?;
    match input.format {
        OutputFormat::Text => output::write_catalog(out, &catalog)?,
        OutputFormat::Json => output::write_json(out, &output::catalog_entries(&catalog))?,
    }
    Ok(())
}
