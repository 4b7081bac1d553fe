//! The final, data-dependent Sankey product an [`crate::run`] call
//! produces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use weaver_core::{Direction, NodeId, NodeKind, Ordering, Value};

/// A used node, carrying the Elsewhere links attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOut {
    /// Sub-node id.
    pub id: NodeId,
    /// Display title.
    pub title: String,
    /// Horizontal layout direction.
    pub direction: Direction,
    /// Whether the node is hidden from the rendered diagram.
    pub hidden: bool,
    /// Opaque display style.
    pub style: Option<String>,
    /// Indices into [`SankeyData::links`] of from-`Elsewhere` links
    /// ending at this node.
    pub from_elsewhere_links: Vec<usize>,
    /// Indices into [`SankeyData::links`] of to-`Elsewhere` links
    /// starting at this node.
    pub to_elsewhere_links: Vec<usize>,
}

/// One aggregated, coloured link in the final diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkOut {
    /// Source sub-node id, or `None` for a from-`Elsewhere` link.
    pub source: Option<NodeId>,
    /// Target sub-node id, or `None` for a to-`Elsewhere` link.
    pub target: Option<NodeId>,
    /// Flow-partition label, or `"*"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Time-partition label, or `"*"`.
    pub time: String,
    /// The aggregated value of the display spec's width column.
    pub link_width: f64,
    /// Every aggregated measure, keyed by column name.
    pub data: BTreeMap<String, Value>,
    /// Display title; equal to [`LinkOut::kind`].
    pub title: String,
    /// Resolved hex colour.
    pub color: String,
    /// Display opacity; always `1.0`.
    pub opacity: f64,
    /// Indices of the input rows this link aggregates.
    pub original_flows: Vec<usize>,
}

/// One used group: the surviving members of a compiled
/// [`weaver_core::GroupSpec`] after pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOut {
    /// Id of the originating SDD node.
    pub id: NodeId,
    /// Display title.
    pub title: String,
    /// Process or waypoint origin, inherited from the group's members.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Surviving member sub-node ids, in partition declaration order.
    pub nodes: Vec<NodeId>,
}

/// The final product of executing a WSpec against a dataset: pruned
/// nodes, aggregated and coloured links, pruned groups, and a filtered
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyData {
    /// Every node that is an endpoint of a regular link or holds an
    /// Elsewhere link.
    pub nodes: Vec<NodeOut>,
    /// Every link with at least one matching row, in edge-id order.
    pub links: Vec<LinkOut>,
    /// Every group with at least one surviving member, redundant
    /// single-member groups dropped.
    pub groups: Vec<GroupOut>,
    /// Ordering filtered to used nodes, with fully-empty layers dropped.
    pub ordering: Ordering,
}
