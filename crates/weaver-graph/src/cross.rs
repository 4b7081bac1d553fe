//! Cross-products a segment's source/target partitions with its flow and
//! time partitions to produce concrete, routable edges.

use weaver_core::{BundleId, NodeId, NodeRef, Partition, Selection};

use crate::view::ViewBundle;

/// One concrete `(src_sub, tgt_sub, flow_label, time_label)` edge
/// produced by crossing a segment's partitions.
///
/// Carries enough metadata for the compiler to both deduplicate merged
/// edges and build the router's insertion rules — the concrete edge
/// itself does not yet have a final [`weaver_core::EdgeId`]; that is
/// assigned after deduplication.
#[derive(Debug, Clone)]
pub struct ConcreteEdge {
    /// Originating bundle.
    pub bundle_id: BundleId,
    /// Segment position within that bundle's waypoint chain.
    pub segment_index: usize,
    /// Unpartitioned segment source (for router "source" constraints).
    pub source: NodeRef,
    /// Unpartitioned segment target (for router "target" constraints).
    pub target: NodeRef,
    /// Source sub-node id, or `None` when `source` is `Elsewhere`.
    pub src_sub: Option<NodeId>,
    /// Target sub-node id, or `None` when `target` is `Elsewhere`.
    pub tgt_sub: Option<NodeId>,
    /// Source partition dimension and matched group label, if the
    /// source is partitioned.
    pub src_partition: Option<(String, String)>,
    /// Target partition dimension and matched group label, if the
    /// target is partitioned.
    pub tgt_partition: Option<(String, String)>,
    /// Flow-partition label, or `"*"`.
    pub flow_label: String,
    /// Flow-partition dimension name, if any.
    pub flow_dimension: Option<String>,
    /// Time-partition label, or `"*"`.
    pub time_label: String,
    /// Time-partition dimension name, if any.
    pub time_dimension: Option<String>,
    /// The segment's inherited flow selection.
    pub flow_selection: Selection,
}

/// One (group label, raw-value matcher) pair iterated while crossing a
/// partitioned endpoint; `None` represents the unpartitioned (or
/// `Elsewhere`-collapsed) single `"*"` identity.
struct AxisPoint {
    dimension: Option<String>,
    label: String,
}

fn endpoint_axis(node: &NodeRef, partition: Option<&Partition>) -> Vec<AxisPoint> {
    if node.is_elsewhere() {
        return vec![AxisPoint {
            dimension: None,
            label: "*".to_string(),
        }];
    }
    match partition {
        None => vec![AxisPoint {
            dimension: None,
            label: "*".to_string(),
        }],
        Some(p) => p
            .groups
            .iter()
            .map(|g| AxisPoint {
                dimension: Some(p.dimension.clone()),
                label: g.label.clone(),
            })
            .collect(),
    }
}

fn axis_sub_id(node: &NodeRef, point: &AxisPoint) -> Option<NodeId> {
    let id = node.node_id()?;
    if point.dimension.is_some() {
        Some(id.sub_node(&point.label))
    } else {
        Some(id.clone())
    }
}

/// Crosses a segment's source/target partitions with the segment's flow
/// partition and the SDD's time partition, in the deterministic order
/// `(src_sub, tgt_sub, flow, time)` — this fixes the edge-id assignment
/// order once the compiler assigns ids in traversal order.
pub fn cross_product(
    segment: &ViewBundle,
    source_partition: Option<&Partition>,
    target_partition: Option<&Partition>,
    time_partition: Option<&Partition>,
) -> Vec<ConcreteEdge> {
    let src_axis = endpoint_axis(&segment.source, source_partition);
    let tgt_axis = endpoint_axis(&segment.target, target_partition);
    let flow_axis = match &segment.flow_partition {
        None => vec![AxisPoint {
            dimension: None,
            label: "*".to_string(),
        }],
        Some(p) => p
            .groups
            .iter()
            .map(|g| AxisPoint {
                dimension: Some(p.dimension.clone()),
                label: g.label.clone(),
            })
            .collect(),
    };
    let time_axis = match time_partition {
        None => vec![AxisPoint {
            dimension: None,
            label: "*".to_string(),
        }],
        Some(p) => p
            .groups
            .iter()
            .map(|g| AxisPoint {
                dimension: Some(p.dimension.clone()),
                label: g.label.clone(),
            })
            .collect(),
    };

    let mut out = Vec::with_capacity(src_axis.len() * tgt_axis.len() * flow_axis.len() * time_axis.len());
    for src_point in &src_axis {
        for tgt_point in &tgt_axis {
            for flow_point in &flow_axis {
                for time_point in &time_axis {
                    out.push(ConcreteEdge {
                        bundle_id: segment.bundle_id,
                        segment_index: segment.segment_index,
                        source: segment.source.clone(),
                        target: segment.target.clone(),
                        src_sub: axis_sub_id(&segment.source, src_point),
                        tgt_sub: axis_sub_id(&segment.target, tgt_point),
                        src_partition: src_point
                            .dimension
                            .clone()
                            .map(|d| (d, src_point.label.clone())),
                        tgt_partition: tgt_point
                            .dimension
                            .clone()
                            .map(|d| (d, tgt_point.label.clone())),
                        flow_label: flow_point.label.clone(),
                        flow_dimension: flow_point.dimension.clone(),
                        time_label: time_point.label.clone(),
                        time_dimension: time_point.dimension.clone(),
                        flow_selection: segment.flow_selection.clone(),
                    });
                }
            }
        }
    }
    out
}
