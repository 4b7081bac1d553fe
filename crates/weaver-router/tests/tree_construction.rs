use std::collections::BTreeMap;

use weaver_core::{EdgeId, Value};
use weaver_router::{branch_order, build, route, Constraint, RouterRule};

fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::Str(v.to_string())))
        .collect()
}

#[test]
fn explicit_bundle_claims_before_elsewhere() {
    let order = branch_order(&[], &[]);
    let explicit = RouterRule {
        constraints: BTreeMap::from([
            ("source".to_string(), Constraint::In(vec!["a".into()])),
            ("target".to_string(), Constraint::In(vec!["b".into()])),
        ]),
        edge_id: EdgeId(0),
        is_elsewhere: false,
    };
    let elsewhere = RouterRule {
        constraints: BTreeMap::from([
            ("target".to_string(), Constraint::In(vec!["b".into()])),
            ("source".to_string(), Constraint::NotIn(vec!["b".into()])),
        ]),
        edge_id: EdgeId(1),
        is_elsewhere: true,
    };
    let tree = build(&order, &[explicit, elsewhere]);

    assert_eq!(route(&row(&[("source", "a"), ("target", "b")]), &tree), &[EdgeId(0)]);
    // a different source still targeting b is residual, claimed by Elsewhere.
    assert_eq!(route(&row(&[("source", "z"), ("target", "b")]), &tree), &[EdgeId(1)]);
}

#[test]
fn source_recheck_excludes_self_loop_within_target_group() {
    // bundle (Elsewhere -> T) where T = {"t1", "t2"}; a row whose source
    // is itself a member of T must not be claimed by this Elsewhere edge.
    let order = branch_order(&[], &[]);
    let elsewhere = RouterRule {
        constraints: BTreeMap::from([
            ("target".to_string(), Constraint::In(vec!["t1".into(), "t2".into()])),
            ("source".to_string(), Constraint::NotIn(vec!["t1".into(), "t2".into()])),
        ]),
        edge_id: EdgeId(5),
        is_elsewhere: true,
    };
    let tree = build(&order, &[elsewhere]);

    assert_eq!(route(&row(&[("source", "t1"), ("target", "t2")]), &tree), &[] as &[EdgeId]);
    assert_eq!(route(&row(&[("source", "outside"), ("target", "t2")]), &tree), &[EdgeId(5)]);
}

#[test]
fn unmatched_row_routes_to_empty_leaf() {
    let order = branch_order(&[], &[]);
    let explicit = RouterRule {
        constraints: BTreeMap::from([("source".to_string(), Constraint::In(vec!["a".into()]))]),
        edge_id: EdgeId(0),
        is_elsewhere: false,
    };
    let tree = build(&order, &[explicit]);
    assert_eq!(route(&row(&[("source", "nowhere")]), &tree), &[] as &[EdgeId]);
    assert_eq!(route(&row(&[]), &tree), &[] as &[EdgeId]);
}

#[test]
fn flow_selection_attribute_becomes_a_branch_dimension() {
    let order = branch_order(&["material".to_string()], &[]);
    assert!(order.contains(&"material".to_string()));
    assert_eq!(order[0], "source");
    assert_eq!(order[1], "target");

    let m1 = RouterRule {
        constraints: BTreeMap::from([("material".to_string(), Constraint::In(vec!["m1".into()]))]),
        edge_id: EdgeId(0),
        is_elsewhere: false,
    };
    let m2 = RouterRule {
        constraints: BTreeMap::new(),
        edge_id: EdgeId(1),
        is_elsewhere: false,
    };
    let tree = build(&order, &[m1, m2]);
    assert_eq!(route(&row(&[("material", "m1")]), &tree), &[EdgeId(0), EdgeId(1)]);
    assert_eq!(route(&row(&[("material", "m2")]), &tree), &[EdgeId(1)]);
}

#[test]
fn attribute_outside_branch_order_is_injected_at_deepest_point() {
    // `order` knows nothing about "grade"; the rule still constrains it.
    let order = branch_order(&[], &[]);
    let baseline = RouterRule {
        constraints: BTreeMap::new(),
        edge_id: EdgeId(0),
        is_elsewhere: false,
    };
    let graded = RouterRule {
        constraints: BTreeMap::from([("grade".to_string(), Constraint::In(vec!["gold".into()]))]),
        edge_id: EdgeId(1),
        is_elsewhere: false,
    };
    let tree = build(&order, &[baseline, graded]);

    // Unconstrained rows still see the baseline edge carried through.
    assert_eq!(route(&row(&[]), &tree), &[EdgeId(0)]);
    assert_eq!(route(&row(&[("grade", "gold")]), &tree), &[EdgeId(0), EdgeId(1)]);
}
