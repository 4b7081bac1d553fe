//! Prunes groups and ordering down to the nodes a run actually used.

use std::collections::{BTreeMap, BTreeSet};

use weaver_core::{GroupSpec, NodeId, NodeKind, NodeSpec, Ordering};

use crate::output::GroupOut;

/// Keeps only the members of `group` that are used, dropping the group
/// entirely if no members survive, or if exactly one member survives and
/// its title duplicates the group's own (redundant single-member
/// nesting).
pub fn prune_group(
    group: &GroupSpec,
    used: &BTreeSet<NodeId>,
    node_specs: &BTreeMap<NodeId, NodeSpec>,
) -> Option<GroupOut> {
    let members: Vec<NodeId> = group
        .nodes
        .iter()
        .filter(|id| used.contains(*id))
        .cloned()
        .collect();

    if members.is_empty() {
        return None;
    }
    if members.len() == 1 {
        if let Some(spec) = node_specs.get(&members[0]) {
            if spec.title == group.title {
                return None;
            }
        }
    }

    let kind: NodeKind = members
        .iter()
        .find_map(|id| node_specs.get(id))
        .map(|spec| spec.kind)
        .unwrap_or(NodeKind::Process);

    Some(GroupOut {
        id: group.id.clone(),
        title: group.title.clone(),
        kind,
        nodes: members,
    })
}

/// Filters every band in `ordering` to `used` node ids, dropping any
/// layer whose every band ends up empty. Surviving layers keep their
/// full band structure, including bands that end up empty, since band
/// position is semantic layout information.
pub fn prune_ordering(ordering: &Ordering, used: &BTreeSet<NodeId>) -> Ordering {
    let layers = ordering
        .layers
        .iter()
        .filter_map(|bands| {
            let filtered: Vec<Vec<NodeId>> = bands
                .iter()
                .map(|band| band.iter().filter(|id| used.contains(*id)).cloned().collect())
                .collect();
            if filtered.iter().all(|band| band.is_empty()) {
                None
            } else {
                Some(filtered)
            }
        })
        .collect();
    Ordering { layers }
}
