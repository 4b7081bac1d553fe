//! Expands each SDD bundle into a chain of segment-bundles through its
//! waypoints.

use weaver_core::{
    BundleId, ErrorInfo, NodeRef, Partition, SankeyDefinition, Selection, WeaverError,
};

/// One segment of a (possibly waypoint-chained) bundle: a direct
/// `source -> target` hop that still carries the originating bundle's
/// flow selection and effective flow partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBundle {
    /// Id of the SDD bundle this segment was expanded from.
    pub bundle_id: BundleId,
    /// Position of this segment within the bundle's waypoint chain.
    pub segment_index: usize,
    /// Segment source.
    pub source: NodeRef,
    /// Segment target.
    pub target: NodeRef,
    /// The bundle's flow selection, inherited unchanged by every
    /// segment.
    pub flow_selection: Selection,
    /// The bundle's effective flow partition (its own override, or the
    /// SDD-level default), inherited unchanged by every segment.
    pub flow_partition: Option<Partition>,
}

/// Expands every bundle in `sdd` into its segment chain.
///
/// A bundle with waypoints `[w1, w2]` from `A` to `B` produces three
/// segments: `A->w1`, `w1->w2`, `w2->B`, each carrying the same flow
/// selection, effective flow partition, and bundle id.
pub fn expand(sdd: &SankeyDefinition) -> Result<Vec<ViewBundle>, WeaverError> {
    let mut out = Vec::new();
    for bundle in &sdd.bundles {
        let chain = build_chain(bundle);
        validate_elsewhere_placement(bundle, &chain)?;

        for (segment_index, pair) in chain.windows(2).enumerate() {
            let source = pair[0].clone();
            let target = pair[1].clone();
            if source == target {
                return Err(WeaverError::Validation(
                    ErrorInfo::new(
                        "cyclic-segment",
                        "bundle segment has identical source and target after waypoint chaining",
                    )
                    .with_context("bundle", bundle.id.0),
                ));
            }
            out.push(ViewBundle {
                bundle_id: bundle.id,
                segment_index,
                source,
                target,
                flow_selection: bundle.flow_selection.clone(),
                flow_partition: bundle
                    .flow_partition
                    .clone()
                    .or_else(|| sdd.default_flow_partition.clone()),
            });
        }
    }
    Ok(out)
}

fn build_chain(bundle: &weaver_core::Bundle) -> Vec<NodeRef> {
    let mut chain = Vec::with_capacity(bundle.waypoints.len() + 2);
    chain.push(bundle.source.clone());
    chain.extend(bundle.waypoints.iter().cloned().map(NodeRef::Node));
    chain.push(bundle.target.clone());
    chain
}

fn validate_elsewhere_placement(
    bundle: &weaver_core::Bundle,
    chain: &[NodeRef],
) -> Result<(), WeaverError> {
    let elsewhere_count = chain.iter().filter(|n| n.is_elsewhere()).count();
    if elsewhere_count > 1 {
        return Err(WeaverError::Validation(
            ErrorInfo::new(
                "elsewhere-not-unique-endpoint",
                "a bundle may have Elsewhere at only one end",
            )
            .with_context("bundle", bundle.id.0),
        ));
    }
    if elsewhere_count == 1 && !(bundle.source.is_elsewhere() || bundle.target.is_elsewhere()) {
        return Err(WeaverError::Validation(
            ErrorInfo::new(
                "elsewhere-interior",
                "Elsewhere may only appear as a bundle's source or target, never a waypoint",
            )
            .with_context("bundle", bundle.id.0),
        ));
    }
    Ok(())
}
