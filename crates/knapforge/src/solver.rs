//! Solver entry points that hide catalog and configuration wiring.

use std::io::ErrorKind;
use std::path::Path;

use knapforge_config::{ConfigError, SolverConfig, DEFAULT_CONFIG_FILE};
use knapforge_core::{Budget, Project, ProjectCatalog, Result};
use knapforge_solver::{
    BranchAndBoundSolver, BudgetRange, SensitivityAnalyzer, SensitivityReport, Solution,
};
use tracing::warn;

/// Solves `projects` at `budget` with the configuration in
/// `knapforge.toml`, or the defaults when that file is absent or invalid.
/// An invalid file is reported with a `config_fallback` warning.
///
/// # Errors
///
/// Fails if a project or the budget is rejected by validation.
pub fn solve(projects: Vec<Project>, budget: f64) -> Result<Solution> {
    solve_with_config(projects, budget, &load_config())
}

/// Solves `projects` at `budget` with an explicit configuration.
pub fn solve_with_config(
    projects: Vec<Project>,
    budget: f64,
    config: &SolverConfig,
) -> Result<Solution> {
    init_console();

    let catalog = ProjectCatalog::new(projects)?;
    let budget = Budget::new(budget)?;
    Ok(BranchAndBoundSolver::from_config(config).solve(&catalog, budget))
}

/// Solves `projects` at every budget in `start..=end` by `step`, with the
/// configuration in `knapforge.toml` or the defaults.
///
/// # Errors
///
/// Fails on invalid projects and on an invalid range.
pub fn analyze(projects: Vec<Project>, start: f64, end: f64, step: f64) -> Result<SensitivityReport> {
    analyze_with_config(projects, start, end, step, &load_config())
}

/// Like [`analyze`], with an explicit configuration.
pub fn analyze_with_config(
    projects: Vec<Project>,
    start: f64,
    end: f64,
    step: f64,
    config: &SolverConfig,
) -> Result<SensitivityReport> {
    init_console();

    let catalog = ProjectCatalog::new(projects)?;
    let range = BudgetRange::new(start, end, step)?;
    Ok(SensitivityAnalyzer::from_config(config).analyze_range(&catalog, &range))
}

fn load_config() -> SolverConfig {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

fn load_config_from(path: &Path) -> SolverConfig {
    match SolverConfig::load(path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => SolverConfig::default(),
        Err(e) => {
            warn!(
                event = "config_fallback",
                path = %path.display(),
                error = %e,
                "ignoring unusable configuration, solving with defaults"
            );
            SolverConfig::default()
        }
    }
}

#[cfg(feature = "console")]
fn init_console() {
    knapforge_console::init();
}

#[cfg(not(feature = "console"))]
fn init_console() {}

#[cfg(test)]
mod tests {
    use super::*;
    use knapforge_core::portfolio::retention_portfolio;
    use knapforge_core::KnapforgeError;
    use knapforge_solver::SolveStatus;

    fn scenario() -> Vec<Project> {
        vec![
            Project::new("item1", 100.0, 30.0),
            Project::new("item2", 150.0, 45.0),
            Project::new("item3", 80.0, 20.0),
            Project::new("item4", 200.0, 70.0),
        ]
    }

    #[test]
    fn test_solve_scenario() {
        let solution = solve_with_config(scenario(), 300.0, &SolverConfig::default()).unwrap();
        assert_eq!(solution.total_impact, 100.0);
        assert_eq!(solution.total_cost, 300.0);
    }

    #[test]
    fn test_invalid_input_is_rejected_before_search() {
        let err = solve_with_config(scenario(), -1.0, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, KnapforgeError::InvalidBudget(-1.0));

        let mut projects = scenario();
        projects.push(Project::new("item1", 5.0, 5.0));
        let err = solve_with_config(projects, 300.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, KnapforgeError::DuplicateProjectId(_)));
    }

    #[test]
    fn test_config_limit_applies() {
        let config = SolverConfig::new().with_warm_start(false).with_node_limit(1);
        let solution = solve_with_config(retention_portfolio(), 300.0, &config).unwrap();
        assert_eq!(solution.status, SolveStatus::LimitReached);
    }

    #[test]
    fn test_analyze() {
        let report = analyze_with_config(scenario(), 0.0, 300.0, 100.0, &SolverConfig::default())
            .unwrap();
        assert_eq!(report.len(), 4);

        let err = analyze_with_config(scenario(), 0.0, 300.0, 0.0, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, KnapforgeError::InvalidRange(_)));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join(DEFAULT_CONFIG_FILE));
        assert!(config.warm_start);
        assert!(config.termination.is_none());
    }

    #[test]
    fn test_malformed_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        std::fs::write(&path, "warm_start = \"sometimes\"\n[termination\n").unwrap();
        let config = load_config_from(&path);
        assert!(config.warm_start);
        assert!(config.termination.is_none());

        std::fs::write(&path, "[termination]\nnode_limit = 0\n").unwrap();
        assert!(load_config_from(&path).termination.is_none());
    }

    #[test]
    fn test_valid_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "warm_start = false\n[termination]\nnode_limit = 7\n").unwrap();

        let config = load_config_from(&path);
        assert!(!config.warm_start);
        assert_eq!(config.node_limit(), Some(7));
    }
}
