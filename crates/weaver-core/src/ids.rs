//! Stable identifiers used throughout the SDD and WSpec data models.

use serde::{Deserialize, Serialize};

/// Identifier for a node (process group or waypoint) as declared in an SDD.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Creates a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw string identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the sub-node id produced when this node is expanded by a
    /// partition group labelled `label` (`"nodeId^label"`).
    pub fn sub_node(&self, label: &str) -> NodeId {
        NodeId(format!("{}^{}", self.0, label))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bundle endpoint: either a declared node or the `Elsewhere` sentinel.
///
/// Modeled as a first class enum variant rather than a magic string, so
/// the compiler can never confuse a real node id with the boundary
/// sentinel. Only at serialization time (in `EdgeSpec`) does `Elsewhere`
/// collapse to `null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// A concrete, declared node.
    Node(NodeId),
    /// The system boundary sentinel.
    Elsewhere,
}

impl NodeRef {
    /// Returns the underlying node id, if this is not `Elsewhere`.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            NodeRef::Node(id) => Some(id),
            NodeRef::Elsewhere => None,
        }
    }

    /// Returns true if this endpoint is the `Elsewhere` sentinel.
    pub fn is_elsewhere(&self) -> bool {
        matches!(self, NodeRef::Elsewhere)
    }
}

/// Identifier assigned to a bundle in SDD declaration order.
///
/// Carrying the origin index lets the router apply the two-pass
/// insertion rule (explicit bundles before `Elsewhere` bundles)
/// deterministically, and lets the compiler order concrete edges by
/// `(bundle origin index, segment index, ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BundleId(pub u32);

/// Stable integer identifier for a concrete edge in a compiled WSpec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal direction a process group or waypoint is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Flows left to right through this node.
    L,
    /// Flows right to left through this node.
    R,
}
