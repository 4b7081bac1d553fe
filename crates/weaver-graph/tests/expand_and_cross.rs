use std::collections::BTreeSet;

use weaver_core::{
    Bundle, Direction, NodeRef, Ordering, Partition, PartitionGroup, ProcessSelection,
    SankeyDefinition, SddNode, Selection, ValueMatch,
};
use weaver_graph::{cross_product, expand};

fn node(id: &str, ids: &[&str]) -> SddNode {
    SddNode {
        id: weaver_core::NodeId::new(id),
        selection: Some(ProcessSelection::Ids(ids.iter().map(|s| s.to_string()).collect())),
        partition: None,
        direction: Direction::L,
        title: id.to_string(),
        style: None,
        hidden: false,
    }
}

fn waypoint(id: &str) -> SddNode {
    SddNode {
        id: weaver_core::NodeId::new(id),
        selection: None,
        partition: None,
        direction: Direction::L,
        title: id.to_string(),
        style: None,
        hidden: false,
    }
}

#[test]
fn waypoint_chain_expands_to_three_segments() {
    let nodes = vec![node("a", &["a"]), waypoint("w1"), waypoint("w2"), node("b", &["b"])];
    let bundle = Bundle {
        id: Default::default(),
        source: NodeRef::Node(weaver_core::NodeId::new("a")),
        target: NodeRef::Node(weaver_core::NodeId::new("b")),
        waypoints: vec![weaver_core::NodeId::new("w1"), weaver_core::NodeId::new("w2")],
        flow_selection: Selection::All,
        flow_partition: None,
    };
    let sdd = SankeyDefinition::new(nodes, vec![bundle], Ordering::default());

    let segments = expand(&sdd).expect("expand");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].source, NodeRef::Node(weaver_core::NodeId::new("a")));
    assert_eq!(segments[0].target, NodeRef::Node(weaver_core::NodeId::new("w1")));
    assert_eq!(segments[1].target, NodeRef::Node(weaver_core::NodeId::new("w2")));
    assert_eq!(segments[2].target, NodeRef::Node(weaver_core::NodeId::new("b")));
}

#[test]
fn elsewhere_at_both_ends_is_rejected() {
    let bundle = Bundle {
        id: Default::default(),
        source: NodeRef::Elsewhere,
        target: NodeRef::Elsewhere,
        waypoints: vec![],
        flow_selection: Selection::All,
        flow_partition: None,
    };
    let sdd = SankeyDefinition::new(vec![], vec![bundle], Ordering::default());
    assert!(expand(&sdd).is_err());
}

#[test]
fn partitioned_endpoints_cross_in_declaration_order() {
    let nodes = vec![node("a", &["a"]), node("b", &["b"])];
    let bundle = Bundle {
        id: Default::default(),
        source: NodeRef::Node(weaver_core::NodeId::new("a")),
        target: NodeRef::Node(weaver_core::NodeId::new("b")),
        waypoints: vec![],
        flow_selection: Selection::All,
        flow_partition: None,
    };
    let sdd = SankeyDefinition::new(nodes, vec![bundle], Ordering::default());
    let segments = expand(&sdd).unwrap();

    let target_partition = Partition {
        dimension: "day".into(),
        groups: vec![
            PartitionGroup {
                label: "weekday".into(),
                matches: ValueMatch::Values(BTreeSet::from(["mon".into(), "tue".into()])),
            },
            PartitionGroup {
                label: "weekend".into(),
                matches: ValueMatch::Values(BTreeSet::from(["sat".into()])),
            },
        ],
    };

    let edges = cross_product(&segments[0], None, Some(&target_partition), None);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].tgt_sub.as_ref().unwrap().as_str(), "b^weekday");
    assert_eq!(edges[1].tgt_sub.as_ref().unwrap().as_str(), "b^weekend");
}
