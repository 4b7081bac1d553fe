//! Builds a [`Tree`] from a set of insertion rules.
//!
//! Construction policy: explicit (non-`Elsewhere`) bundles are inserted
//! first, each rule claiming every leaf its constraints reach; `Elsewhere`
//! bundles are inserted second and only claim leaves still empty after
//! the explicit pass, which is what keeps an `Elsewhere` bundle from double-counting
//! flow an explicit bundle already covers. An `Elsewhere` rule on one
//! side additionally carries a [`Constraint::NotIn`] on the opposite
//! side's attribute, naming the far endpoint's own process ids — this is
//! the "source recheck" that stops a row internal to a process group
//! from also being counted as crossing that group's boundary.

use std::collections::BTreeMap;

use weaver_core::{EdgeId, Tree};

/// A single attribute constraint attached to a [`RouterRule`].
#[derive(Debug, Clone)]
pub enum Constraint {
    /// The row's stringified value for this attribute must be one of
    /// these.
    In(Vec<String>),
    /// The row's stringified value for this attribute must not be any
    /// of these (used for the `Elsewhere` source-recheck rule).
    NotIn(Vec<String>),
}

/// One bundle's contribution to the routing tree: an edge id, reached
/// whenever every constrained attribute matches.
///
/// Attributes absent from `constraints` are unconstrained: the rule
/// applies regardless of that attribute's value, i.e. it is inserted
/// into every existing branch at that depth plus the default child.
#[derive(Debug, Clone)]
pub struct RouterRule {
    /// Per-attribute constraints, keyed by attribute name.
    pub constraints: BTreeMap<String, Constraint>,
    /// Edge id this rule routes matching rows to.
    pub edge_id: EdgeId,
    /// Whether this rule originates from an `Elsewhere` bundle — such
    /// rules only claim leaves that are still empty when inserted.
    pub is_elsewhere: bool,
}

/// Computes the global branch attribute order: `source`, `target`, then
/// every explicit flow-selection attribute (sorted), then every
/// partition dimension (sorted) — a selectivity rank that minimises
/// average traversal depth.
pub fn branch_order(flow_selection_attrs: &[String], partition_dims: &[String]) -> Vec<String> {
    let mut order = vec!["source".to_string(), "target".to_string()];
    let mut flow_attrs: Vec<&String> = flow_selection_attrs
        .iter()
        .filter(|a| a.as_str() != "source" && a.as_str() != "target")
        .collect();
    flow_attrs.sort();
    flow_attrs.dedup();
    for attr in flow_attrs {
        if !order.contains(attr) {
            order.push(attr.clone());
        }
    }
    let mut dims: Vec<&String> = partition_dims.iter().collect();
    dims.sort();
    dims.dedup();
    for dim in dims {
        if !order.contains(dim) {
            order.push(dim.clone());
        }
    }
    order
}

/// Builds a routing tree from `rules`, following the global attribute
/// `order`. Callers must supply `rules` with every explicit-bundle rule
/// before every `Elsewhere`-bundle rule (the two-pass insertion policy);
/// within each pass, any order is deterministic as long as it is stable
/// across runs.
pub fn build(order: &[String], rules: &[RouterRule]) -> Tree {
    let mut root = Tree::empty_leaf();
    for rule in rules {
        let full_order = extend_order(order, rule);
        insert(&mut root, 0, &full_order, rule);
    }
    root
}

/// Resolves Open Question (b): an attribute a rule constrains that is
/// not already part of the global branch order gets appended to that
/// rule's own traversal path, injecting an extra `Branch` at the
/// deepest point reached while inserting it.
fn extend_order(order: &[String], rule: &RouterRule) -> Vec<String> {
    let mut extra: Vec<&String> = rule
        .constraints
        .keys()
        .filter(|attr| !order.contains(attr))
        .collect();
    if extra.is_empty() {
        return order.to_vec();
    }
    extra.sort();
    let mut full = order.to_vec();
    full.extend(extra.into_iter().cloned());
    full
}

fn insert(node: &mut Tree, idx: usize, order: &[String], rule: &RouterRule) {
    if idx == order.len() {
        if let Tree::Leaf { value } = node {
            let already_claimed = !value.is_empty();
            if rule.is_elsewhere {
                if !already_claimed {
                    value.push(rule.edge_id);
                }
            } else if !value.contains(&rule.edge_id) {
                value.push(rule.edge_id);
            }
        }
        return;
    }

    let attr = &order[idx];
    ensure_branch(node, attr);
    let (branches, default) = match node {
        Tree::Branch {
            branches, default, ..
        } => (branches, default),
        Tree::Leaf { .. } => unreachable!("ensure_branch always converts Leaf to Branch"),
    };

    match rule.constraints.get(attr) {
        None => {
            for child in branches.values_mut() {
                insert(child, idx + 1, order, rule);
            }
            insert(default, idx + 1, order, rule);
        }
        Some(Constraint::In(values)) => {
            for value in values {
                let child = branches
                    .entry(value.clone())
                    .or_insert_with(|| Box::new((**default).clone()));
                insert(child, idx + 1, order, rule);
            }
        }
        Some(Constraint::NotIn(values)) => {
            for value in values {
                branches
                    .entry(value.clone())
                    .or_insert_with(|| Box::new((**default).clone()));
            }
            for (value, child) in branches.iter_mut() {
                if !values.contains(value) {
                    insert(child, idx + 1, order, rule);
                }
            }
            insert(default, idx + 1, order, rule);
        }
    }
}

/// Converts `node` in place into a `Branch` dispatching on `attr`, if it
/// is not one already. Any edge ids already accumulated in a terminal
/// leaf are carried into the new branch's `default` child, so converting
/// a previously-terminal position (the Open Question (b) case) never
/// drops rows a prior rule already claimed there.
fn ensure_branch(node: &mut Tree, attr: &str) {
    if let Tree::Branch { attr: existing, .. } = node {
        debug_assert_eq!(existing, attr, "branch order must be stable across a build");
        return;
    }
    let carried = match node {
        Tree::Leaf { value } => std::mem::take(value),
        Tree::Branch { .. } => unreachable!(),
    };
    *node = Tree::Branch {
        attr: attr.to_string(),
        branches: BTreeMap::new(),
        default: Box::new(Tree::Leaf { value: carried }),
    };
}
