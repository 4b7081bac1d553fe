#![deny(missing_docs)]

//! Executes a compiled [`weaver_core::WSpec`] against a flow dataset:
//! routes every row, aggregates measures per edge, resolves colour,
//! prunes unused nodes/groups/ordering, and emits [`SankeyData`].

pub mod measure;
pub mod output;
pub mod prune;

use std::collections::{BTreeMap, BTreeSet};

use weaver_core::{NodeId, Row, WSpec};
use weaver_router::route;

pub use output::{GroupOut, LinkOut, NodeOut, SankeyData};

/// Runs `wspec` against `rows`, producing the final [`SankeyData`].
///
/// Row iteration is eager: `rows` is collected once so that aggregation
/// can re-read columns after routing. Failure is never raised because of
/// imperfect data (missing columns, unmatched branch keys) — this
/// executor has no failure mode to surface, since every WSpec this crate
/// is given has already passed compilation.
pub fn run<R: Row>(wspec: &WSpec, rows: impl IntoIterator<Item = R>) -> SankeyData {
    let rows: Vec<R> = rows.into_iter().collect();

    let mut accumulator: Vec<Vec<usize>> = vec![Vec::new(); wspec.edges.len()];
    for (i, row) in rows.iter().enumerate() {
        for edge_id in route(row, &wspec.routing_tree) {
            accumulator[edge_id.0 as usize].push(i);
        }
    }

    let mut links = Vec::new();
    let mut from_elsewhere: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
    let mut to_elsewhere: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
    let mut used: BTreeSet<NodeId> = BTreeSet::new();

    for edge in &wspec.edges {
        let row_indices = &accumulator[edge.id.0 as usize];
        if row_indices.is_empty() {
            continue;
        }

        let data = measure::aggregate_all(&wspec.measures, &rows, row_indices);
        let link_width = data
            .get(&wspec.display.link_width)
            .and_then(weaver_core::Value::as_f64)
            .unwrap_or(0.0);

        let edge_attrs = weaver_color::EdgeAttrs {
            kind: &edge.kind,
            source: edge.source.as_ref().map(NodeId::as_str),
            target: edge.target.as_ref().map(NodeId::as_str),
            time: &edge.time,
        };
        let color = weaver_color::resolve(&wspec.display.link_color, edge_attrs, &data);

        let link_index = links.len();
        match (&edge.source, &edge.target) {
            (None, Some(target)) => {
                used.insert(target.clone());
                from_elsewhere.entry(target.clone()).or_default().push(link_index);
            }
            (Some(source), None) => {
                used.insert(source.clone());
                to_elsewhere.entry(source.clone()).or_default().push(link_index);
            }
            (Some(source), Some(target)) => {
                used.insert(source.clone());
                used.insert(target.clone());
            }
            (None, None) => {}
        }

        links.push(LinkOut {
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.kind.clone(),
            time: edge.time.clone(),
            link_width,
            data,
            title: edge.kind.clone(),
            color,
            opacity: 1.0,
            original_flows: row_indices.clone(),
        });
    }

    let nodes = used
        .iter()
        .filter_map(|id| {
            wspec.nodes.get(id).map(|spec| NodeOut {
                id: spec.id.clone(),
                title: spec.title.clone(),
                direction: spec.direction,
                hidden: spec.hidden,
                style: spec.style.clone(),
                from_elsewhere_links: from_elsewhere.get(id).cloned().unwrap_or_default(),
                to_elsewhere_links: to_elsewhere.get(id).cloned().unwrap_or_default(),
            })
        })
        .collect();

    let groups = wspec
        .groups
        .iter()
        .filter_map(|group| prune::prune_group(group, &used, &wspec.nodes))
        .collect();

    let ordering = prune::prune_ordering(&wspec.ordering, &used);

    SankeyData {
        nodes,
        links,
        groups,
        ordering,
    }
}
