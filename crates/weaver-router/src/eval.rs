//! Routes a single flow row through a [`Tree`] to its edge ids.

use weaver_core::{EdgeId, Row, Tree};

/// Classifies `row` against `tree`, returning the (possibly empty) list
/// of edge ids it routes to.
///
/// Pure and total: every row reaches exactly one leaf, since every
/// `Branch` carries a `default` child for absent or unmatched attribute
/// values. No allocation occurs beyond the returned slice reference.
pub fn route<'a, R: Row>(row: &R, tree: &'a Tree) -> &'a [EdgeId] {
    let mut node = tree;
    loop {
        match node {
            Tree::Leaf { value } => return value,
            Tree::Branch {
                attr,
                branches,
                default,
            } => {
                let key = row.get(attr).map(|v| v.branch_key());
                node = match key.and_then(|k| branches.get(&k)) {
                    Some(child) => child,
                    None => default,
                };
            }
        }
    }
}
