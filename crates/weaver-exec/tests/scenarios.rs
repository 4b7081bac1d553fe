use std::collections::BTreeMap;

use weaver_compiler::compile;
use weaver_core::{
    Aggregation, Bundle, ColorSpec, Direction, DisplaySpec, MeasureSpec, NodeId, NodeRef, Ordering,
    ProcessSelection, SankeyDefinition, SddNode, Selection, Value,
};
use weaver_exec::run;

fn process(id: &str) -> SddNode {
    SddNode {
        id: NodeId::new(id),
        selection: Some(ProcessSelection::Ids([id.to_string()].into_iter().collect())),
        partition: None,
        direction: Direction::L,
        title: id.to_string(),
        style: None,
        hidden: false,
    }
}

fn row(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn categorical_display() -> DisplaySpec {
    DisplaySpec {
        link_width: "value".to_string(),
        link_color: ColorSpec::Categorical {
            attr: "type".to_string(),
            lookup: BTreeMap::new(),
            default: "#888888".to_string(),
        },
    }
}

#[test]
fn two_node_single_aggregation_drops_unmatched_rows() {
    let sdd = SankeyDefinition::new(
        vec![process("a"), process("b")],
        vec![Bundle {
            id: Default::default(),
            source: NodeRef::Node(NodeId::new("a")),
            target: NodeRef::Node(NodeId::new("b")),
            waypoints: vec![],
            flow_selection: Selection::All,
            flow_partition: None,
        }],
        Ordering {
            layers: vec![vec![vec![NodeId::new("a")]], vec![vec![NodeId::new("b")]]],
        },
    );
    let wspec = compile(
        &sdd,
        vec![MeasureSpec {
            column: "value".to_string(),
            aggregation: Aggregation::Sum,
        }],
        categorical_display(),
    )
    .unwrap();

    let rows = vec![
        row(&[("source", "a".into()), ("target", "b".into()), ("value", 5.0.into())]),
        row(&[("source", "a".into()), ("target", "b".into()), ("value", 3.0.into())]),
        row(&[("source", "x".into()), ("target", "y".into()), ("value", 10.0.into())]),
    ];
    let data = run(&wspec, rows);

    assert_eq!(data.links.len(), 1);
    let link = &data.links[0];
    assert_eq!(link.link_width, 8.0);
    assert_eq!(link.original_flows, vec![0, 1]);
    assert_eq!(data.nodes.len(), 2);
}

#[test]
fn from_elsewhere_link_attaches_to_target_node() {
    let sdd = SankeyDefinition::new(
        vec![process("a")],
        vec![Bundle {
            id: Default::default(),
            source: NodeRef::Elsewhere,
            target: NodeRef::Node(NodeId::new("a")),
            waypoints: vec![],
            flow_selection: Selection::All,
            flow_partition: None,
        }],
        Ordering {
            layers: vec![vec![vec![NodeId::new("a")]]],
        },
    );
    let wspec = compile(
        &sdd,
        vec![MeasureSpec {
            column: "value".to_string(),
            aggregation: Aggregation::Sum,
        }],
        categorical_display(),
    )
    .unwrap();

    let rows = vec![
        row(&[("source", "x".into()), ("target", "a".into()), ("value", 7.0.into())]),
        row(&[("source", "y".into()), ("target", "a".into()), ("value", 3.0.into())]),
    ];
    let data = run(&wspec, rows);

    assert!(data.links.iter().all(|l| l.source.is_none()));
    assert_eq!(data.links[0].link_width, 10.0);
    assert_eq!(data.nodes.len(), 1);
    assert_eq!(data.nodes[0].from_elsewhere_links, vec![0]);
}

#[test]
fn mean_aggregation_ignores_absent_values() {
    let sdd = SankeyDefinition::new(
        vec![process("a"), process("b")],
        vec![Bundle {
            id: Default::default(),
            source: NodeRef::Node(NodeId::new("a")),
            target: NodeRef::Node(NodeId::new("b")),
            waypoints: vec![],
            flow_selection: Selection::All,
            flow_partition: None,
        }],
        Ordering {
            layers: vec![vec![vec![NodeId::new("a")]], vec![vec![NodeId::new("b")]]],
        },
    );
    let wspec = compile(
        &sdd,
        vec![
            MeasureSpec {
                column: "value".to_string(),
                aggregation: Aggregation::Sum,
            },
            MeasureSpec {
                column: "intensity".to_string(),
                aggregation: Aggregation::Mean,
            },
        ],
        categorical_display(),
    )
    .unwrap();

    let rows = vec![
        row(&[
            ("source", "a".into()),
            ("target", "b".into()),
            ("value", 10.0.into()),
            ("intensity", 2.0.into()),
        ]),
        row(&[
            ("source", "a".into()),
            ("target", "b".into()),
            ("value", 20.0.into()),
            ("intensity", 4.0.into()),
        ]),
    ];
    let data = run(&wspec, rows);

    let link = &data.links[0];
    assert_eq!(link.data.get("value").and_then(Value::as_f64), Some(30.0));
    assert_eq!(link.data.get("intensity").and_then(Value::as_f64), Some(3.0));
}

#[test]
fn quantitative_colour_interpolates_at_the_midpoint() {
    let sdd = SankeyDefinition::new(
        vec![process("a"), process("b")],
        vec![Bundle {
            id: Default::default(),
            source: NodeRef::Node(NodeId::new("a")),
            target: NodeRef::Node(NodeId::new("b")),
            waypoints: vec![],
            flow_selection: Selection::All,
            flow_partition: None,
        }],
        Ordering {
            layers: vec![vec![vec![NodeId::new("a")]], vec![vec![NodeId::new("b")]]],
        },
    );
    let display = DisplaySpec {
        link_width: "value".to_string(),
        link_color: ColorSpec::Quantitative {
            attr: "value".to_string(),
            intensity: None,
            domain: [0.0, 100.0],
            palette: vec!["#000000".to_string(), "#ffffff".to_string()],
        },
    };
    let wspec = compile(
        &sdd,
        vec![MeasureSpec {
            column: "value".to_string(),
            aggregation: Aggregation::Sum,
        }],
        display,
    )
    .unwrap();

    let rows = vec![row(&[
        ("source", "a".into()),
        ("target", "b".into()),
        ("value", 50.0.into()),
    ])];
    let data = run(&wspec, rows);

    assert_eq!(data.links[0].color, "#7f7f7f");
}
