//! `weaver compile`: turns an SDD plus measure/display config into a WSpec.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args as ClapArgs;
use serde::de::DeserializeOwned;
use weaver_core::{DisplaySpec, MeasureSpec, SankeyDefinition};

use crate::write_json;

/// Deserializes `path` as YAML if its extension is `.yaml`/`.yml`,
/// otherwise as JSON. A hand-authored Sankey Diagram Definition is most
/// naturally edited as YAML; a WSpec or measures list produced by another
/// tool is most naturally JSON.
fn load<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Ok(serde_json::from_str(&contents)?),
    }
}

/// Arguments for `weaver compile`.
#[derive(ClapArgs, Debug)]
pub struct CompileArgs {
    /// Path to the Sankey Diagram Definition, as YAML or JSON.
    sdd: PathBuf,
    /// Path to a JSON array of measure specs.
    #[arg(long)]
    measures: PathBuf,
    /// Path to a JSON display spec (link width column and colour rule).
    #[arg(long)]
    display: PathBuf,
    /// Output path for the compiled WSpec.
    #[arg(short, long)]
    out: PathBuf,
}

/// Runs the `compile` subcommand.
pub fn run(args: &CompileArgs) -> Result<(), Box<dyn Error>> {
    let sdd: SankeyDefinition = load(&args.sdd)?;
    let measures: Vec<MeasureSpec> = load(&args.measures)?;
    let display: DisplaySpec = load(&args.display)?;

    let wspec = weaver_compiler::compile(&sdd, measures, display)?;
    write_json(&args.out, &wspec)?;
    Ok(())
}
