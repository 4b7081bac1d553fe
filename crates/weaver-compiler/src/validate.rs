//! SDD validation: every reference the compiler later assumes is valid
//! must be checked here first, so that a malformed SDD never reaches
//! partition cross-product or tree construction.

use std::collections::BTreeSet;

use weaver_core::{ErrorInfo, NodeRef, SankeyDefinition, WeaverError};

/// Validates `sdd`, returning the first violation found.
///
/// Checks: every bundle endpoint and waypoint names a declared node,
/// waypoints carry no process selection, every ordering entry names a
/// declared node, and no node id is declared twice.
pub fn validate(sdd: &SankeyDefinition) -> Result<(), WeaverError> {
    let mut seen = BTreeSet::new();
    for node in &sdd.nodes {
        if !seen.insert(node.id.clone()) {
            return Err(WeaverError::Validation(
                ErrorInfo::new("duplicate-node-id", "node id declared more than once")
                    .with_context("id", node.id.as_str()),
            ));
        }
    }

    for bundle in &sdd.bundles {
        for endpoint in [&bundle.source, &bundle.target] {
            if let NodeRef::Node(id) = endpoint {
                if !seen.contains(id) {
                    return Err(WeaverError::Validation(
                        ErrorInfo::new("unknown-node-id", "bundle endpoint names an undeclared node")
                            .with_context("bundle", bundle.id.0)
                            .with_context("id", id.as_str()),
                    ));
                }
            }
        }
        for waypoint in &bundle.waypoints {
            match sdd.node(waypoint) {
                None => {
                    return Err(WeaverError::Validation(
                        ErrorInfo::new("unknown-waypoint", "bundle waypoint names an undeclared node")
                            .with_context("bundle", bundle.id.0)
                            .with_context("id", waypoint.as_str()),
                    ))
                }
                Some(node) if !node.is_waypoint() => {
                    return Err(WeaverError::Validation(
                        ErrorInfo::new(
                            "waypoint-has-selection",
                            "a node used as a waypoint must not declare a process selection",
                        )
                        .with_context("id", waypoint.as_str()),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    for layer in &sdd.ordering.layers {
        for band in layer {
            for id in band {
                if !seen.contains(id) {
                    return Err(WeaverError::Validation(
                        ErrorInfo::new("unknown-ordering-id", "ordering entry names an undeclared node")
                            .with_context("id", id.as_str()),
                    ));
                }
            }
        }
    }

    for node in &sdd.nodes {
        if let Some(partition) = &node.partition {
            let mut labels = BTreeSet::new();
            for group in &partition.groups {
                if !labels.insert(group.label.clone()) {
                    return Err(WeaverError::Validation(
                        ErrorInfo::new(
                            "duplicate-partition-label",
                            "two groups in the same partition share a label",
                        )
                        .with_context("node", node.id.as_str())
                        .with_context("label", group.label.clone()),
                    ));
                }
            }
        }
    }

    Ok(())
}
