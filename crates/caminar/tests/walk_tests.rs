//! Integration tests for walking workflows
//!
//! Drives small hand-written workflows through `Flow` and checks routes,
//! pruning, replay, merging, and fault capture.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use caminar::{
    Advance, Case, Destination, Field, Flow, Form, Graph, LeafKind, Priority, Route, Seed, Step,
};
use proptest::prelude::*;
use std::sync::Arc;

fn yes_no() -> Arc<Form> {
    Arc::new(Form::new([("ok", Field::choice([("yes", true), ("no", false)]).unwrap())]).unwrap())
}

fn ok(case: &Case) -> bool {
    case["ok"].as_bool().unwrap_or(false)
}

// =============================================================================
// Submit -> Pay -> Deliver
// =============================================================================

#[derive(Debug)]
struct Submit {
    form: Arc<Form>,
}

#[derive(Debug)]
struct Pay {
    form: Arc<Form>,
}

#[derive(Debug)]
struct Deliver {
    form: Arc<Form>,
}

impl Step for Submit {
    fn name(&self) -> &str {
        "submit"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if ok(case) {
            Advance::next(Pay {
                form: Arc::clone(&self.form),
            })
        } else {
            Advance::error("order abandoned")
        }
    }
}

impl Step for Pay {
    fn name(&self) -> &str {
        "pay"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if ok(case) {
            Advance::next(Deliver {
                form: Arc::clone(&self.form),
            })
        } else {
            Advance::error("payment declined")
        }
    }
}

impl Step for Deliver {
    fn name(&self) -> &str {
        "deliver"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        if ok(case) {
            Advance::finished("order complete")
        } else {
            Advance::error("delivery rejected")
        }
    }
}

fn linear() -> Flow {
    Flow::new(Submit { form: yes_no() }).with_seed(Seed::from_u64(11))
}

fn messages(routes: &[Route]) -> Vec<&str> {
    routes.iter().map(|r| r.leaf().message.as_str()).collect()
}

#[test]
fn test_linear_baseline_walk() {
    let mut flow = linear();
    let routes = flow.walk(0);

    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(route.len(), 3);
    assert_eq!(route.steps().collect::<Vec<_>>(), vec!["submit", "pay", "deliver"]);
    assert_eq!(route.leaf().kind, LeafKind::Finished);

    let graph = flow.build_graph();
    assert_eq!(graph.step_edges().count(), 2);
    assert_eq!(graph.leaf_edges().count(), 1);
}

#[test]
fn test_linear_boundary_walk_spends_one_deviation() {
    let mut flow = linear();
    let routes = flow.walk(1);

    assert_eq!(
        messages(routes),
        vec![
            "order complete",
            "delivery rejected",
            "payment declined",
            "order abandoned"
        ]
    );
    assert!(routes.iter().all(|r| r.cost() <= 1));

    let summary = flow.summary();
    assert_eq!(summary.routes, 4);
    assert_eq!(summary.finished, 1);
    assert_eq!(summary.domain_errors, 3);
    assert!(!summary.has_defects());
}

#[test]
fn test_linear_dot_output() {
    let mut flow = linear();
    flow.walk(0);
    let dot = flow.build_graph().to_dot();

    assert!(dot.contains("\"submit\" -> \"pay\" [ label = \"yes\" ];"));
    assert!(dot.contains("\"pay\" -> \"deliver\" [ label = \"yes\" ];"));
    assert!(dot.contains("\"deliver\" -> \"order\\ncomplete\" [ label = \"yes\" ];"));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_routes() {
    let mut first = linear();
    let mut second = linear();
    assert_eq!(first.walk(2), second.walk(2));
}

#[test]
fn test_replay_is_deterministic() {
    let mut flow = linear();
    flow.walk(1);
    let cases: Vec<Case> = flow.routes()[1].cases().cloned().collect();

    let a = linear().replay(&cases);
    let b = linear().replay(&cases);
    assert_eq!(a, b);
    assert_eq!(a.steps, vec!["submit", "pay", "deliver"]);
    assert_eq!(a.end.map(|l| l.message), Some("delivery rejected".to_string()));
}

// =============================================================================
// Pruning at the ceiling
// =============================================================================

/// Two boolean fields, so the exhaustive cross product holds a priority-3 case
fn pair() -> Arc<Form> {
    Arc::new(
        Form::new([
            ("a", Field::choice([("a+", true), ("a-", false)]).unwrap()),
            ("b", Field::choice([("b+", true), ("b-", false)]).unwrap()),
        ])
        .unwrap(),
    )
}

#[derive(Debug)]
struct First {
    form: Arc<Form>,
}

#[derive(Debug)]
struct Second {
    form: Arc<Form>,
}

impl Step for First {
    fn name(&self) -> &str {
        "first"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, _case: &Case) -> Advance {
        Advance::next(Second {
            form: Arc::clone(&self.form),
        })
    }
}

impl Step for Second {
    fn name(&self) -> &str {
        "second"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, _case: &Case) -> Advance {
        Advance::finished("done")
    }
}

#[test]
fn test_exhaustive_case_fits_at_ceiling_three() {
    let mut flow = Flow::new(First { form: pair() });
    let routes = flow.walk(3);

    // first p0 -> 4, first p1 (x2) -> 3 each, first p3 -> 1
    assert_eq!(routes.len(), 11);
    let with_p3 = routes
        .iter()
        .filter(|r| r.hops_at_least(Priority::EXHAUSTIVE) == 1)
        .count();
    assert_eq!(with_p3, 2);
    assert!(routes.iter().all(|r| r.cost() <= 3));
}

#[test]
fn test_boundary_ceiling_allows_one_deviation() {
    let mut flow = Flow::new(First { form: pair() });
    let routes = flow.walk(1);

    // first p0 -> 3, first p1 (x2) -> 1 each
    assert_eq!(routes.len(), 5);
    assert!(routes.iter().all(|r| r.hops_at_least(Priority::BOUNDARY) <= 1));
}

proptest! {
    #[test]
    fn prop_route_cost_never_exceeds_ceiling(ceiling in 0i32..=3, seed in any::<u64>()) {
        let mut flow = Flow::new(First { form: pair() }).with_seed(Seed::from_u64(seed));
        for route in flow.walk(ceiling) {
            prop_assert!(route.cost() <= ceiling as u32);
        }
    }
}

// =============================================================================
// Merging
// =============================================================================

#[derive(Debug)]
struct Method {
    form: Arc<Form>,
}

impl Method {
    fn new() -> Self {
        let field = Field::choice([("card", "card"), ("cash", "cash")]).unwrap();
        Self {
            form: Arc::new(Form::new([("method", field)]).unwrap()),
        }
    }
}

impl Step for Method {
    fn name(&self) -> &str {
        "method"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, _case: &Case) -> Advance {
        Advance::next(Deliver { form: yes_no() })
    }
}

#[test]
fn test_same_sequence_routes_merge_labels() {
    let mut flow = Flow::new(Method::new());
    flow.walk(1);
    let graph: Graph = flow.build_graph();

    let labels: Vec<(String, String, Vec<String>)> = graph
        .edges()
        .iter()
        .map(|e| (e.source.clone(), e.dest.to_string(), e.labels.clone()))
        .collect();
    let expected = [
        ("method", "deliver", vec!["card", "cash"]),
        ("deliver", "order complete", vec!["yes"]),
        ("method", "deliver", vec!["card"]),
        ("deliver", "delivery rejected", vec!["no"]),
    ];
    assert_eq!(labels.len(), expected.len());
    for ((source, dest, labels), (want_source, want_dest, want_labels)) in
        labels.iter().zip(expected)
    {
        assert_eq!(source, want_source);
        assert_eq!(dest, want_dest);
        assert_eq!(labels, &want_labels);
    }
}

#[test]
fn test_graph_has_no_duplicate_edges() {
    let mut flow = linear();
    flow.walk(2);
    let graph = flow.build_graph();
    for (i, a) in graph.edges().iter().enumerate() {
        for b in &graph.edges()[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// =============================================================================
// Faults
// =============================================================================

#[derive(Debug)]
struct Courier {
    form: Arc<Form>,
}

impl Step for Courier {
    fn name(&self) -> &str {
        "courier"
    }

    fn form(&self) -> &Form {
        &self.form
    }

    fn advance(&self, case: &Case) -> Advance {
        assert!(ok(case), "courier lost the parcel");
        Advance::finished("delivered")
    }
}

#[test]
fn test_panicking_step_is_recorded_and_walk_continues() {
    let mut flow = Flow::new(Method::new());
    flow.walk(0);
    assert_eq!(flow.summary().faults(), 0);

    let mut flow = Flow::new(Courier { form: yes_no() });
    let routes = flow.walk(1);
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].leaf().kind, LeafKind::Finished);
    assert_eq!(routes[1].leaf().kind, LeafKind::Fault);
    assert!(matches!(
        &routes[1].hops()[0].to,
        Destination::Leaf(leaf) if leaf.message.contains("courier lost the parcel")
    ));

    let summary = flow.summary();
    assert!(summary.has_defects());
    assert_eq!(summary.defects[0].step, "courier");
    assert_eq!(summary.defects[0].case, "no");
}
