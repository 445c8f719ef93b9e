//! Tests for termination conditions.

use super::*;
use crate::scope::SolverScope;

fn scope_with_expansions(count: u64) -> SolverScope {
    let mut scope = SolverScope::new();
    for _ in 0..count {
        scope.stats_mut().on_node_expanded();
    }
    scope
}

#[test]
fn test_no_termination() {
    assert!(!NoTermination.is_terminated(&scope_with_expansions(1_000)));
}

#[test]
fn test_node_count_termination() {
    let term = NodeCountTermination::new(3);

    assert!(!term.is_terminated(&scope_with_expansions(0)));
    assert!(!term.is_terminated(&scope_with_expansions(2)));
    assert!(term.is_terminated(&scope_with_expansions(3)));
}

#[test]
fn test_time_termination_zero_limit() {
    let scope = SolverScope::new();
    assert!(TimeTermination::millis(0).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3_600).is_terminated(&scope));
}

#[test]
fn test_external_termination_shares_flag() {
    let scope = SolverScope::new();
    let term = ExternalTermination::new();
    let handle = term.clone();

    assert!(!term.is_terminated(&scope));
    handle.terminate();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let scope = scope_with_expansions(5);

    let term = OrTermination((NodeCountTermination::new(10), NoTermination));
    assert!(!term.is_terminated(&scope));

    let term = OrTermination((
        TimeTermination::seconds(3_600),
        NodeCountTermination::new(5),
    ));
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_optional_termination() {
    let scope = scope_with_expansions(5);

    let absent: Option<NodeCountTermination> = None;
    assert!(!absent.is_terminated(&scope));
    assert!(Some(NodeCountTermination::new(1)).is_terminated(&scope));

    let term = OrTermination((absent, Some(NodeCountTermination::new(5))));
    assert!(term.is_terminated(&scope));
}
