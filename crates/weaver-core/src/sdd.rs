//! Sankey Diagram Definition: the declarative input to the compiler.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{BundleId, Direction, NodeId, NodeRef};

/// Which raw process ids a [`ProcessGroup`] selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessSelection {
    /// An explicit set of raw process ids.
    Ids(BTreeSet<String>),
    /// Every process id not claimed by any other group's explicit
    /// selection — a catch-all group, mirroring floweaver's own
    /// "everything else" default group.
    All,
}

/// A declarative match against a dimension's raw values, used by both
/// process partitions and flow/time partitions.
///
/// Kept as an explicit enumerated value set rather than an arbitrary
/// predicate closure: partitions in floweaver are themselves declarative
/// value lists, and an inspectable set is required for deterministic
/// routing-tree construction and for testable property 2 (byte-identical
/// WSpecs across runs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueMatch {
    /// The dimension's raw value must be one of these.
    Values(BTreeSet<String>),
    /// Matches any value not claimed by a sibling group in the same
    /// partition (floweaver's catch-all partition group).
    Rest,
}

/// One labelled group within a [`Partition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionGroup {
    /// Sub-node suffix and display label for this group.
    pub label: String,
    /// Which raw dimension values belong to this group.
    pub matches: ValueMatch,
}

/// A dimension name plus an ordered list of labelled value groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Name of the dataset column this partition reads.
    pub dimension: String,
    /// Groups in declaration order; declaration order is the order used
    /// when expanding sub-nodes and sub-edges (§4.3's ordering contract).
    pub groups: Vec<PartitionGroup>,
}

/// A process group or waypoint declared in an SDD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SddNode {
    /// Stable identifier, referenced by bundles and ordering.
    pub id: NodeId,
    /// `Some` for process groups; `None` for waypoints (waypoints have no
    /// process selection).
    pub selection: Option<ProcessSelection>,
    /// Optional partition splitting this node into sub-nodes.
    pub partition: Option<Partition>,
    /// Horizontal layout direction.
    pub direction: Direction,
    /// Display title.
    pub title: String,
    /// Opaque display style forwarded verbatim to `NodeSpec.style`.
    #[serde(default)]
    pub style: Option<String>,
    /// Whether this node is hidden from the rendered diagram.
    #[serde(default)]
    pub hidden: bool,
}

impl SddNode {
    /// Returns true if this node is a waypoint (no process selection).
    pub fn is_waypoint(&self) -> bool {
        self.selection.is_none()
    }
}

/// An atomic or compound predicate over a flow row's attributes.
///
/// Kept as a small AST instead of a closure for the same reason as
/// [`ValueMatch`]: the router's construction policy (§4.4) needs to
/// inspect which attributes a selection touches in order to decide branch
/// order and insertion paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Matches every row unconditionally.
    All,
    /// `row[attr] == value`.
    Eq(String, String),
    /// `row[attr]` is one of `values`.
    In(String, BTreeSet<String>),
    /// Every sub-selection must match.
    And(Vec<Selection>),
}

impl Selection {
    /// Returns the set of attribute names this selection reads.
    pub fn attributes(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes(&self, out: &mut BTreeSet<String>) {
        match self {
            Selection::All => {}
            Selection::Eq(attr, _) | Selection::In(attr, _) => {
                out.insert(attr.clone());
            }
            Selection::And(parts) => {
                for part in parts {
                    part.collect_attributes(out);
                }
            }
        }
    }
}

/// A declared route of flows from one node to another, possibly through
/// waypoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Declaration order index, assigned by [`SankeyDefinition::new`].
    #[serde(default)]
    pub id: BundleId,
    /// Source endpoint.
    pub source: NodeRef,
    /// Target endpoint.
    pub target: NodeRef,
    /// Ordered waypoint ids the bundle's route passes through.
    #[serde(default)]
    pub waypoints: Vec<NodeId>,
    /// Restricts which rows travel along this bundle.
    #[serde(default = "Selection::all")]
    pub flow_selection: Selection,
    /// Overrides the SDD-level default flow partition for this bundle.
    #[serde(default)]
    pub flow_partition: Option<Partition>,
}

impl Selection {
    /// `serde(default)` helper constructing [`Selection::All`].
    pub fn all() -> Self {
        Selection::All
    }
}

/// Three level nested ordering: layers, then bands within a layer, then
/// node positions within a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ordering {
    /// Layers, left to right; each layer is a list of bands, each band a
    /// list of node ids, top to bottom.
    pub layers: Vec<Vec<Vec<NodeId>>>,
}

/// The full declarative diagram definition: the compiler's only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyDefinition {
    /// Every declared process group and waypoint.
    pub nodes: Vec<SddNode>,
    /// Declared bundles, in authoring order.
    pub bundles: Vec<Bundle>,
    /// Layout ordering.
    pub ordering: Ordering,
    /// Default flow partition used when a bundle does not override it.
    #[serde(default)]
    pub default_flow_partition: Option<Partition>,
    /// Default time partition, used by every bundle (bundles cannot
    /// override the time partition).
    #[serde(default)]
    pub default_time_partition: Option<Partition>,
}

impl SankeyDefinition {
    /// Builds a definition from nodes, bundles and ordering, stamping
    /// each bundle's `id` with its position in `bundles` (the origin
    /// index used for deterministic tie-breaking).
    pub fn new(nodes: Vec<SddNode>, mut bundles: Vec<Bundle>, ordering: Ordering) -> Self {
        for (idx, bundle) in bundles.iter_mut().enumerate() {
            bundle.id = BundleId(idx as u32);
        }
        Self {
            nodes,
            bundles,
            ordering,
            default_flow_partition: None,
            default_time_partition: None,
        }
    }

    /// Returns the declared node with the given id, if any.
    pub fn node(&self, id: &NodeId) -> Option<&SddNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
