//! Tests for solver configuration.

use super::*;
use std::io::Write;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        warm_start = false

        [termination]
        node_limit = 5000
        seconds_spent_limit = 2
        millis_spent_limit = 500

        [sensitivity]
        parallel = true
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert!(!config.warm_start);
    assert_eq!(config.node_limit(), Some(5000));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
    assert!(config.sensitivity.parallel);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        warm_start: true
        termination:
          node_limit: 42
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert!(config.warm_start);
    assert_eq!(config.node_limit(), Some(42));
    assert_eq!(config.time_limit(), None);
    assert!(!config.sensitivity.parallel);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert!(config.warm_start);
    assert!(config.termination.is_none());
    assert!(!config.sensitivity.parallel);
}

#[test]
fn test_zero_node_limit_is_invalid() {
    let err = SolverConfig::from_toml_str("[termination]\nnode_limit = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_type_is_a_parse_error() {
    let err = SolverConfig::from_toml_str("warm_start = \"yes\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_warm_start(false)
        .with_node_limit(100)
        .with_termination_seconds(1)
        .with_termination_millis(250)
        .with_parallel_sensitivity(true);

    assert!(!config.warm_start);
    assert_eq!(config.node_limit(), Some(100));
    assert_eq!(config.time_limit(), Some(Duration::from_millis(1250)));
    assert!(config.sensitivity.parallel);
}

#[test]
fn test_zero_time_means_unlimited() {
    let term = TerminationConfig {
        seconds_spent_limit: Some(0),
        ..Default::default()
    };
    assert_eq!(term.time_limit(), None);
}

#[test]
fn test_load_missing_file_falls_back() {
    let config = SolverConfig::load("/nonexistent/knapforge.toml").unwrap_or_default();
    assert!(config.warm_start);
}

#[test]
fn test_from_file_picks_format_by_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "warm_start: false").unwrap();
    assert!(!SolverConfig::from_file(yaml.path()).unwrap().warm_start);

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "[termination]\nnode_limit = 7").unwrap();
    assert_eq!(SolverConfig::from_file(toml.path()).unwrap().node_limit(), Some(7));
}
