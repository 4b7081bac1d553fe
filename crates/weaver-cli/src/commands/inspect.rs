//! `weaver inspect`: prints summary statistics about a compiled WSpec.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args as ClapArgs;
use weaver_core::{Tree, WSpec};

/// Arguments for `weaver inspect`.
#[derive(ClapArgs, Debug)]
pub struct InspectArgs {
    /// Path to a compiled WSpec, as JSON.
    wspec: PathBuf,
}

fn tree_depth(tree: &Tree) -> usize {
    match tree {
        Tree::Leaf { .. } => 0,
        Tree::Branch { branches, default, .. } => {
            let branch_max = branches.values().map(tree_depth).max().unwrap_or(0);
            1 + branch_max.max(tree_depth(default))
        }
    }
}

/// Runs the `inspect` subcommand.
pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let wspec: WSpec = serde_json::from_str(&fs::read_to_string(&args.wspec)?)?;

    println!("schema version: {}", wspec.version);
    println!("input hash: {}", wspec.provenance.input_hash);
    println!("nodes: {}", wspec.nodes.len());
    println!("groups: {}", wspec.groups.len());
    println!("edges: {}", wspec.edges.len());
    println!("measures: {}", wspec.measures.len());
    println!("routing tree depth: {}", tree_depth(&wspec.routing_tree));
    Ok(())
}
