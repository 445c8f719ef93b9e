//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};

/// Exact budgeted project selection: picks the highest-impact portfolio that fits a budget
#[derive(Parser, Debug)]
#[command(name = "knapforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show solver progress (-v debug, -vv every node)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report warnings from the solver
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Solver configuration file (TOML or YAML; default: ./knapforge.toml if present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the optimal portfolio for one budget
    Solve {
        /// Spending cap
        #[arg(short, long)]
        budget: f64,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Solve over a range of budgets and report marginal impact
    Sensitivity {
        /// First budget of the sweep
        #[arg(long, default_value_t = 100.0)]
        from: f64,

        /// Last budget of the sweep (inclusive)
        #[arg(long, default_value_t = 600.0)]
        to: f64,

        /// Distance between two budgets
        #[arg(long, default_value_t = 50.0)]
        step: f64,

        /// Solve budget points on all cores
        #[arg(long)]
        parallel: bool,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// List the catalog in the order the search visits it
    Catalog {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Where projects come from and how results are printed.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Project catalog (.json or .toml; default: built-in retention portfolio)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Overrides for values read from the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// Start from an empty incumbent instead of the greedy selection
    #[arg(long)]
    pub no_warm_start: bool,

    /// Stop after this many node expansions
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub node_limit: Option<u64>,

    /// Stop after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Cli {
    /// Console filter directives for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "knapforge_solver=warn";
        }
        match self.verbose {
            0 => "knapforge_solver=info",
            1 => "knapforge_solver=debug",
            _ => "knapforge_solver=trace",
        }
    }
}
