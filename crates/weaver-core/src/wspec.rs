//! Weaver Specification: the compiled, data-independent diagram plan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{BundleId, Direction, EdgeId, NodeId};
use crate::provenance::{Provenance, SchemaVersion};

/// Whether a [`NodeSpec`] originated from a process group or a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Expanded from a process group (has a process selection).
    Process,
    /// Expanded from a waypoint (routing only, no process selection).
    Waypoint,
}

/// A node in the compiled WSpec: one per sub-node produced by partition
/// expansion of an SDD node (or the node itself, if unpartitioned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Stable sub-node id (`"nodeId"` or `"nodeId^label"`).
    pub id: NodeId,
    /// Process or waypoint origin.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Display title, with the partition label appended for partition
    /// members.
    pub title: String,
    /// Horizontal layout direction.
    pub direction: Direction,
    /// Whether the node is hidden from the rendered diagram.
    pub hidden: bool,
    /// Opaque display style forwarded from the SDD.
    pub style: Option<String>,
    /// Id of the [`GroupSpec`] this sub-node belongs to.
    pub group: NodeId,
}

/// Groups the sub-nodes produced from a single SDD node (partition
/// members, or a lone unpartitioned member).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Id of the originating SDD node.
    pub id: NodeId,
    /// Display title of the originating SDD node.
    pub title: String,
    /// Member sub-node ids, in partition declaration order.
    pub nodes: Vec<NodeId>,
}

/// A concrete, routable edge in the compiled WSpec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// Stable integer id; also the edge's position in [`WSpec::edges`].
    pub id: EdgeId,
    /// Source sub-node id, or `None` for a from-`Elsewhere` edge.
    pub source: Option<NodeId>,
    /// Target sub-node id, or `None` for a to-`Elsewhere` edge.
    pub target: Option<NodeId>,
    /// Flow-partition label, or `"*"` when the edge has no flow
    /// partition.
    #[serde(rename = "type")]
    pub kind: String,
    /// Time-partition label, or `"*"` when the edge has no time
    /// partition.
    pub time: String,
    /// Ids of every SDD bundle that produced this (possibly merged) edge.
    pub bundle_ids: Vec<BundleId>,
}

/// How a measure column is aggregated per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Ordinary sum; absent values contribute nothing.
    Sum,
    /// Mean over present values only; absent values are skipped, not
    /// counted as zero.
    Mean,
}

/// A column to aggregate per edge, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    /// Dataset column name.
    pub column: String,
    /// Aggregation rule.
    pub aggregation: Aggregation,
}

/// Categorical or quantitative colour resolution rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorSpec {
    /// Looks the stringified attribute value up in a literal table,
    /// falling back to `default` when absent.
    Categorical {
        /// Attribute read from the edge (`type`/`source`/`target`/`time`)
        /// or from the aggregated measure data.
        attr: String,
        /// Value to hex-colour lookup.
        lookup: BTreeMap<String, String>,
        /// Fallback colour for unmatched values.
        default: String,
    },
    /// Normalises a numeric attribute into `[0,1]` over `domain` and
    /// interpolates linearly through `palette`.
    Quantitative {
        /// Attribute read from the aggregated measure data.
        attr: String,
        /// Optional divisor attribute (also read from measure data).
        intensity: Option<String>,
        /// `[min, max]` domain the value is normalised against.
        domain: [f64; 2],
        /// Ordered hex colour anchors.
        palette: Vec<String>,
    },
}

/// Link width column and colour rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySpec {
    /// Column read (from aggregated measure data) as the link's width.
    pub link_width: String,
    /// Colour resolution rule.
    pub link_color: ColorSpec,
}

/// Decision tree classifying a flow row to zero or more edge ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tree {
    /// Terminal node: the edge ids a row reaching this point is routed
    /// to.
    Leaf {
        /// Matched edge ids, in construction order.
        value: Vec<EdgeId>,
    },
    /// Branches on `row[attr]`. Falls back to `default` when the
    /// attribute is absent or its value is not a key of `branches`.
    Branch {
        /// Attribute name this node dispatches on.
        attr: String,
        /// Observed value to child-tree mapping.
        branches: BTreeMap<String, Tree>,
        /// Fallback child for absent/unmatched values.
        default: Box<Tree>,
    },
}

impl Tree {
    /// An empty leaf, the starting point for tree construction.
    pub fn empty_leaf() -> Self {
        Tree::Leaf { value: Vec::new() }
    }
}

/// The compiled, data-independent Weaver Specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WSpec {
    /// Wire-format schema version.
    pub version: SchemaVersion,
    /// Provenance linking this WSpec back to the SDD that produced it.
    #[serde(default)]
    pub provenance: Provenance,
    /// Every sub-node, keyed by id.
    pub nodes: BTreeMap<NodeId, NodeSpec>,
    /// Partition groups, one per originating SDD node.
    pub groups: Vec<GroupSpec>,
    /// Concrete edges, in id order (`edges[i].id == EdgeId(i as u32)`).
    pub edges: Vec<EdgeSpec>,
    /// Layout ordering, rewritten to sub-node ids.
    pub ordering: crate::sdd::Ordering,
    /// Measure aggregation rules.
    pub measures: Vec<MeasureSpec>,
    /// Link width and colour rule.
    pub display: DisplaySpec,
    /// Routing decision tree.
    pub routing_tree: Tree,
}
