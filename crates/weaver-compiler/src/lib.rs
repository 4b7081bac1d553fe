#![deny(missing_docs)]

//! Compiles a [`SankeyDefinition`] into a [`WSpec`]: expands bundles and
//! partitions, deduplicates the resulting edges, and builds the routing
//! tree that drives the executor.

pub mod assemble;
pub mod hash;
pub mod rules;
pub mod validate;

use weaver_core::{
    DisplaySpec, MeasureSpec, Provenance, SankeyDefinition, SchemaVersion, WSpec, WeaverError,
};
use weaver_graph::{cross_product, expand};

use crate::rules::StagedEdge;

/// Compiles `sdd` together with its top-level measure and display
/// configuration into a portable, data-independent [`WSpec`].
///
/// Validates `sdd`, expands bundles through `weaver_graph::expand`,
/// cross-product partitions through `weaver_graph::cross_product`,
/// deduplicate the resulting edges, build the node/group/ordering
/// metadata, and drive `weaver_router::build` from the per-edge
/// constraint rules.
pub fn compile(
    sdd: &SankeyDefinition,
    measures: Vec<MeasureSpec>,
    display: DisplaySpec,
) -> Result<WSpec, WeaverError> {
    validate::validate(sdd)?;

    let segments = expand(sdd)?;

    let mut staged: Vec<StagedEdge> = Vec::new();
    for segment in &segments {
        let source_partition = segment
            .source
            .node_id()
            .and_then(|id| sdd.node(id))
            .and_then(|n| n.partition.clone());
        let target_partition = segment
            .target
            .node_id()
            .and_then(|id| sdd.node(id))
            .and_then(|n| n.partition.clone());
        let time_partition = sdd.default_time_partition.clone();

        let concrete = cross_product(
            segment,
            source_partition.as_ref(),
            target_partition.as_ref(),
            time_partition.as_ref(),
        );
        for edge in concrete {
            staged.push(StagedEdge {
                edge,
                source_partition: source_partition.clone(),
                target_partition: target_partition.clone(),
                flow_partition: segment.flow_partition.clone(),
                time_partition: time_partition.clone(),
            });
        }
    }

    let (merged, edge_ids) = assemble::merge_edges(&staged);
    let global_explicit = rules::global_explicit_ids(sdd);

    let mut explicit_rules = Vec::new();
    let mut elsewhere_rules = Vec::new();
    for (entry, edge_id) in staged.iter().zip(edge_ids.iter()) {
        let rule = rules::build_rule(sdd, entry, *edge_id, &global_explicit);
        if rule.is_elsewhere {
            elsewhere_rules.push(rule);
        } else {
            explicit_rules.push(rule);
        }
    }
    let mut all_rules = explicit_rules;
    all_rules.extend(elsewhere_rules);

    let (flow_selection_attrs, partition_dims) = rules::collect_branch_inputs(sdd, &staged);
    let order = weaver_router::branch_order(&flow_selection_attrs, &partition_dims);
    let routing_tree = weaver_router::build(&order, &all_rules);

    let (nodes, groups) = assemble::build_nodes_and_groups(sdd);
    let ordering = assemble::rewrite_ordering(sdd);
    let edges = merged
        .into_iter()
        .map(|m| weaver_core::EdgeSpec {
            id: m.id,
            source: m.source,
            target: m.target,
            kind: m.kind,
            time: m.time,
            bundle_ids: m.bundle_ids,
        })
        .collect();

    Ok(WSpec {
        version: SchemaVersion::default(),
        provenance: Provenance {
            input_hash: hash::hash_sdd(sdd),
        },
        nodes,
        groups,
        edges,
        ordering,
        measures,
        display,
        routing_tree,
    })
}
