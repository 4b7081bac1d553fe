//! Builds the per-edge [`RouterRule`]s the compiler hands to
//! `weaver_router::build`, and the global branch attribute order.

use std::collections::{BTreeMap, BTreeSet};

use weaver_core::{EdgeId, NodeRef, Partition, ProcessSelection, SankeyDefinition, Selection, ValueMatch};
use weaver_router::{Constraint, RouterRule};

use weaver_graph::ConcreteEdge;

/// A concrete edge plus the partition objects its axis labels were drawn
/// from, carried alongside so constraint construction can resolve a
/// `Rest` group's complement without looking the partition back up.
pub struct StagedEdge {
    /// The concrete edge itself.
    pub edge: ConcreteEdge,
    /// Source node's process partition, if partitioned.
    pub source_partition: Option<Partition>,
    /// Target node's process partition, if partitioned.
    pub target_partition: Option<Partition>,
    /// The segment's effective flow partition.
    pub flow_partition: Option<Partition>,
    /// The SDD-level time partition.
    pub time_partition: Option<Partition>,
}

/// Returns the attribute this selection requires the row's raw value to
/// fall inside.
fn membership_constraint(selection: &ProcessSelection, global_explicit: &BTreeSet<String>) -> Constraint {
    match selection {
        ProcessSelection::Ids(ids) => Constraint::In(ids.iter().cloned().collect()),
        ProcessSelection::All => Constraint::NotIn(global_explicit.iter().cloned().collect()),
    }
}

/// The logical negation of [`membership_constraint`]: "row's raw value is
/// *not* a member of this selection" — used for the `Elsewhere`
/// source-recheck, which excludes rows whose opposite endpoint already
/// belongs to the concrete side's own process group.
fn non_membership_constraint(selection: &ProcessSelection, global_explicit: &BTreeSet<String>) -> Constraint {
    match selection {
        ProcessSelection::Ids(ids) => Constraint::NotIn(ids.iter().cloned().collect()),
        ProcessSelection::All => Constraint::In(global_explicit.iter().cloned().collect()),
    }
}

fn partition_group_constraint(partition: &Partition, label: &str) -> Constraint {
    let group = partition
        .groups
        .iter()
        .find(|g| g.label == label)
        .expect("concrete edge label always names a declared partition group");
    match &group.matches {
        ValueMatch::Values(values) => Constraint::In(values.iter().cloned().collect()),
        ValueMatch::Rest => {
            let mut excluded = Vec::new();
            for sibling in &partition.groups {
                if let ValueMatch::Values(values) = &sibling.matches {
                    excluded.extend(values.iter().cloned());
                }
            }
            Constraint::NotIn(excluded)
        }
    }
}

fn insert_selection_constraints(constraints: &mut BTreeMap<String, Constraint>, selection: &Selection) {
    match selection {
        Selection::All => {}
        Selection::Eq(attr, value) => {
            constraints.insert(attr.clone(), Constraint::In(vec![value.clone()]));
        }
        Selection::In(attr, values) => {
            constraints.insert(attr.clone(), Constraint::In(values.iter().cloned().collect()));
        }
        Selection::And(parts) => {
            for part in parts {
                insert_selection_constraints(constraints, part);
            }
        }
    }
}

/// Computes every raw process id claimed explicitly (by an `Ids`
/// selection) anywhere in the SDD — the universe a catch-all `All`
/// selection's complement is drawn from.
pub fn global_explicit_ids(sdd: &SankeyDefinition) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for node in &sdd.nodes {
        if let Some(ProcessSelection::Ids(ids)) = &node.selection {
            out.extend(ids.iter().cloned());
        }
    }
    out
}

/// Builds the [`RouterRule`] for one staged concrete edge, resolving
/// process-group membership, process-partition, flow-partition and
/// time-partition constraints and the inherited flow selection.
pub fn build_rule(
    sdd: &SankeyDefinition,
    staged: &StagedEdge,
    edge_id: EdgeId,
    global_explicit: &BTreeSet<String>,
) -> RouterRule {
    let edge = &staged.edge;
    let mut constraints = BTreeMap::new();

    match &edge.source {
        NodeRef::Node(id) => {
            let node = sdd.node(id).expect("validated SDD names only declared nodes");
            if let Some(selection) = &node.selection {
                constraints.insert("source".to_string(), membership_constraint(selection, global_explicit));
            }
            if let (Some(partition), Some((dim, label))) = (&staged.source_partition, &edge.src_partition) {
                constraints.insert(dim.clone(), partition_group_constraint(partition, label));
            }
        }
        NodeRef::Elsewhere => {
            if let NodeRef::Node(target_id) = &edge.target {
                if let Some(selection) = sdd.node(target_id).and_then(|n| n.selection.as_ref()) {
                    constraints.insert(
                        "source".to_string(),
                        non_membership_constraint(selection, global_explicit),
                    );
                }
            }
        }
    }

    match &edge.target {
        NodeRef::Node(id) => {
            let node = sdd.node(id).expect("validated SDD names only declared nodes");
            if let Some(selection) = &node.selection {
                constraints.insert("target".to_string(), membership_constraint(selection, global_explicit));
            }
            if let (Some(partition), Some((dim, label))) = (&staged.target_partition, &edge.tgt_partition) {
                constraints.insert(dim.clone(), partition_group_constraint(partition, label));
            }
        }
        NodeRef::Elsewhere => {
            if let NodeRef::Node(source_id) = &edge.source {
                if let Some(selection) = sdd.node(source_id).and_then(|n| n.selection.as_ref()) {
                    constraints.insert(
                        "target".to_string(),
                        non_membership_constraint(selection, global_explicit),
                    );
                }
            }
        }
    }

    insert_selection_constraints(&mut constraints, &edge.flow_selection);

    if let Some(partition) = &staged.flow_partition {
        if edge.flow_label != "*" {
            constraints.insert(
                partition.dimension.clone(),
                partition_group_constraint(partition, &edge.flow_label),
            );
        }
    }
    if let Some(partition) = &staged.time_partition {
        if edge.time_label != "*" {
            constraints.insert(
                partition.dimension.clone(),
                partition_group_constraint(partition, &edge.time_label),
            );
        }
    }

    RouterRule {
        constraints,
        edge_id,
        is_elsewhere: edge.source.is_elsewhere() || edge.target.is_elsewhere(),
    }
}

/// Computes the global branch attribute order (see
/// `weaver_router::branch_order`'s selectivity-rank contract): every
/// attribute named by a bundle's flow selection, and every process,
/// flow, or time partition dimension in play.
pub fn collect_branch_inputs(sdd: &SankeyDefinition, staged: &[StagedEdge]) -> (Vec<String>, Vec<String>) {
    let mut flow_selection_attrs = BTreeSet::new();
    let mut partition_dims = BTreeSet::new();

    for bundle in &sdd.bundles {
        flow_selection_attrs.extend(bundle.flow_selection.attributes());
    }
    for node in &sdd.nodes {
        if let Some(partition) = &node.partition {
            partition_dims.insert(partition.dimension.clone());
        }
    }
    for entry in staged {
        if let Some(partition) = &entry.flow_partition {
            partition_dims.insert(partition.dimension.clone());
        }
        if let Some(partition) = &entry.time_partition {
            partition_dims.insert(partition.dimension.clone());
        }
    }

    (
        flow_selection_attrs.into_iter().collect(),
        partition_dims.into_iter().collect(),
    )
}
