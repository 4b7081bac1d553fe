//! `weaver run`: executes a compiled WSpec against a CSV flow dataset.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args as ClapArgs;
use weaver_core::WSpec;

use crate::{dataset, write_json};

/// Arguments for `weaver run`.
#[derive(ClapArgs, Debug)]
pub struct RunArgs {
    /// Path to a compiled WSpec, as JSON.
    wspec: PathBuf,
    /// Path to the flow dataset, as a header'd CSV file.
    #[arg(long)]
    dataset: PathBuf,
    /// Output path for the resulting Sankey diagram data.
    #[arg(short, long)]
    out: PathBuf,
}

/// Runs the `run` subcommand.
pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let wspec: WSpec = serde_json::from_str(&fs::read_to_string(&args.wspec)?)?;
    let rows = dataset::read_csv(&args.dataset)?;

    let data = weaver_exec::run(&wspec, rows);
    write_json(&args.out, &data)?;
    Ok(())
}
