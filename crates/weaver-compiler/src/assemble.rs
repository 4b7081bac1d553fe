//! Builds the node map, group list, ordering rewrite, and deduplicated
//! edge list from a compiled SDD.

use std::collections::BTreeMap;

use weaver_core::{
    BundleId, EdgeId, NodeId, NodeKind, NodeSpec, Ordering, SankeyDefinition, SddNode,
};
use weaver_graph::ConcreteEdge;

use crate::rules::StagedEdge;

/// Returns the ordered sub-node ids a declared node expands to: the node
/// id itself when unpartitioned, or one `"id^label"` per partition group
/// in declaration order.
pub fn sub_node_ids(node: &SddNode) -> Vec<NodeId> {
    match &node.partition {
        None => vec![node.id.clone()],
        Some(partition) => partition
            .groups
            .iter()
            .map(|g| node.id.sub_node(&g.label))
            .collect(),
    }
}

fn sub_node_title(node: &SddNode, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} - {}", node.title, label),
        None => node.title.clone(),
    }
}

/// Builds the full node map and one [`weaver_core::GroupSpec`] per
/// declared node, covering every sub-node whether or not any edge ends
/// up referencing it — pruning of unused nodes/groups is the executor's
/// job, not the compiler's.
pub fn build_nodes_and_groups(
    sdd: &SankeyDefinition,
) -> (BTreeMap<NodeId, NodeSpec>, Vec<weaver_core::GroupSpec>) {
    let mut nodes = BTreeMap::new();
    let mut groups = Vec::with_capacity(sdd.nodes.len());

    for node in &sdd.nodes {
        let kind = if node.is_waypoint() {
            NodeKind::Waypoint
        } else {
            NodeKind::Process
        };
        let members = sub_node_ids(node);
        let labels: Vec<Option<String>> = match &node.partition {
            None => vec![None],
            Some(partition) => partition.groups.iter().map(|g| Some(g.label.clone())).collect(),
        };

        for (sub_id, label) in members.iter().zip(labels.iter()) {
            nodes.insert(
                sub_id.clone(),
                NodeSpec {
                    id: sub_id.clone(),
                    kind,
                    title: sub_node_title(node, label.as_deref()),
                    direction: node.direction,
                    hidden: node.hidden,
                    style: node.style.clone(),
                    group: node.id.clone(),
                },
            );
        }

        groups.push(weaver_core::GroupSpec {
            id: node.id.clone(),
            title: node.title.clone(),
            nodes: members,
        });
    }

    (nodes, groups)
}

/// Rewrites the SDD ordering, splicing each declared node's sub-node ids
/// in for the node id, in place, preserving layer/band structure.
pub fn rewrite_ordering(sdd: &SankeyDefinition) -> Ordering {
    let layers = sdd
        .ordering
        .layers
        .iter()
        .map(|bands| {
            bands
                .iter()
                .map(|band| {
                    band.iter()
                        .flat_map(|id| {
                            sdd.node(id)
                                .map(sub_node_ids)
                                .unwrap_or_else(|| vec![id.clone()])
                        })
                        .collect()
                })
                .collect()
        })
        .collect();
    Ordering { layers }
}

/// One deduplicated edge: every staged concrete edge sharing
/// `(src_sub, tgt_sub, type, time)` collapses into one of these, keeping
/// the union of originating bundle ids.
pub struct MergedEdge {
    /// Final edge id, assigned in first-seen order.
    pub id: EdgeId,
    /// Source sub-node id, or `None` for a from-`Elsewhere` edge.
    pub source: Option<NodeId>,
    /// Target sub-node id, or `None` for a to-`Elsewhere` edge.
    pub target: Option<NodeId>,
    /// Flow-partition label, or `"*"`.
    pub kind: String,
    /// Time-partition label, or `"*"`.
    pub time: String,
    /// Every bundle that produced a concrete edge merged into this one.
    pub bundle_ids: Vec<BundleId>,
}

type MergeKey = (Option<NodeId>, Option<NodeId>, String, String);

fn merge_key(edge: &ConcreteEdge) -> MergeKey {
    (
        edge.src_sub.clone(),
        edge.tgt_sub.clone(),
        edge.flow_label.clone(),
        edge.time_label.clone(),
    )
}

/// Deduplicates `staged` edges in first-seen order, returning the merged
/// edges plus a parallel `EdgeId` for every input entry (for
/// [`crate::rules::build_rule`] to target the right merged edge).
pub fn merge_edges(staged: &[StagedEdge]) -> (Vec<MergedEdge>, Vec<EdgeId>) {
    let mut merged: Vec<MergedEdge> = Vec::new();
    let mut index_by_key: BTreeMap<MergeKey, usize> = BTreeMap::new();
    let mut edge_ids = Vec::with_capacity(staged.len());

    for entry in staged {
        let key = merge_key(&entry.edge);
        let idx = match index_by_key.get(&key) {
            Some(&idx) => {
                let bundle_id = entry.edge.bundle_id;
                if !merged[idx].bundle_ids.contains(&bundle_id) {
                    merged[idx].bundle_ids.push(bundle_id);
                }
                idx
            }
            None => {
                let idx = merged.len();
                merged.push(MergedEdge {
                    id: EdgeId(idx as u32),
                    source: entry.edge.src_sub.clone(),
                    target: entry.edge.tgt_sub.clone(),
                    kind: entry.edge.flow_label.clone(),
                    time: entry.edge.time_label.clone(),
                    bundle_ids: vec![entry.edge.bundle_id],
                });
                index_by_key.insert(key, idx);
                idx
            }
        };
        edge_ids.push(merged[idx].id);
    }

    (merged, edge_ids)
}
