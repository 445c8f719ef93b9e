//! Tests for the domain model.

use super::*;
use crate::error::KnapforgeError;

fn ids(catalog: &ProjectCatalog) -> Vec<&str> {
    catalog
        .ranked()
        .iter()
        .map(|r| catalog.project(r.index).id().as_str())
        .collect()
}

#[test]
fn test_ratio_order_with_ties() {
    // b and c share ratio 0.5; c is cheaper. d and e share ratio and cost.
    let catalog = ProjectCatalog::new(vec![
        Project::new("a", 10.0, 10.0),
        Project::new("b", 40.0, 20.0),
        Project::new("c", 20.0, 10.0),
        Project::new("d", 30.0, 6.0),
        Project::new("e", 30.0, 6.0),
    ])
    .unwrap();

    assert_eq!(ids(&catalog), ["a", "c", "b", "d", "e"]);
}

#[test]
fn test_zero_cost_projects_are_split_out() {
    let catalog = ProjectCatalog::new(vec![
        Project::new("free-win", 0.0, 5.0),
        Project::new("paid", 10.0, 3.0),
        Project::new("noop", 0.0, 0.0),
    ])
    .unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.searchable_len(), 1);
    assert_eq!(catalog.forced(), &[0]);
    assert_eq!(catalog.forced_impact(), 5.0);
    assert_eq!(ids(&catalog), ["paid"]);
}

#[test]
fn test_rejects_negative_cost() {
    let err = ProjectCatalog::new(vec![
        Project::new("ok", 1.0, 1.0),
        Project::new("bad", -1.0, 1.0),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        KnapforgeError::NegativeCost {
            id: ProjectId::from("bad"),
            cost: -1.0
        }
    );
}

#[test]
fn test_rejects_negative_impact() {
    let err = ProjectCatalog::new(vec![Project::new("bad", 1.0, -0.1)]).unwrap_err();
    assert!(matches!(err, KnapforgeError::NegativeImpact { .. }));
}

#[test]
fn test_rejects_non_finite_values() {
    let err = ProjectCatalog::new(vec![Project::new("nan", f64::NAN, 1.0)]).unwrap_err();
    assert!(matches!(
        err,
        KnapforgeError::NonFiniteValue { field: "cost", .. }
    ));

    let err = ProjectCatalog::new(vec![Project::new("inf", 1.0, f64::INFINITY)]).unwrap_err();
    assert!(matches!(
        err,
        KnapforgeError::NonFiniteValue { field: "impact", .. }
    ));
}

#[test]
fn test_rejects_duplicate_ids() {
    let err = ProjectCatalog::new(vec![
        Project::new("x", 1.0, 1.0),
        Project::new("x", 2.0, 2.0),
    ])
    .unwrap_err();

    assert_eq!(err, KnapforgeError::DuplicateProjectId(ProjectId::from("x")));
}

#[test]
fn test_rejects_empty_id() {
    let err = ProjectCatalog::new(vec![
        Project::new("x", 1.0, 1.0),
        Project::new("  ", 2.0, 2.0),
    ])
    .unwrap_err();

    assert_eq!(err, KnapforgeError::EmptyProjectId(1));
}

#[test]
fn test_empty_catalog() {
    let catalog = ProjectCatalog::new(Vec::new()).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.searchable_len(), 0);
    assert_eq!(catalog.total_cost(), 0.0);
}

#[test]
fn test_find_and_totals() {
    let catalog = ProjectCatalog::new(vec![
        Project::new("a", 100.0, 30.0).with_name("Mentoring"),
        Project::new("b", 150.0, 45.0),
    ])
    .unwrap();

    let (index, project) = catalog.find("a").unwrap();
    assert_eq!(index, 0);
    assert_eq!(project.label(), "Mentoring");
    assert_eq!(catalog.find("b").unwrap().1.label(), "b");
    assert!(catalog.find("zzz").is_none());
    assert_eq!(catalog.total_cost(), 250.0);
    assert_eq!(catalog.total_impact(), 75.0);
}

#[test]
fn test_efficiency_zero_cost() {
    assert_eq!(Project::new("free", 0.0, 10.0).efficiency(), 0.0);
    assert!((Project::new("p", 50.0, 25.0).efficiency() - 0.5).abs() < 1e-12);
}

#[cfg(feature = "serde")]
#[test]
fn test_project_deserializes_numeric_ids() {
    let projects: Vec<Project> = serde_json::from_str(
        r#"[
            {"id": 1, "name": "Mentoring", "cost": 40.0, "impact": 10.0, "category": "Development"},
            {"id": "two", "cost": 30.0, "impact": 14.0}
        ]"#,
    )
    .unwrap();

    assert_eq!(projects[0].id().as_str(), "1");
    assert_eq!(projects[0].category(), Some("Development"));
    assert_eq!(projects[1].name(), None);
}
