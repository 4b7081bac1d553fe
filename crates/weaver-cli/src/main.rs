use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    compile::{self, CompileArgs},
    inspect::{self, InspectArgs},
    run::{self, RunArgs},
};

mod commands;
mod dataset;

#[derive(Parser, Debug)]
#[command(name = "weaver", about = "Sankey diagram compiler and executor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a Sankey Diagram Definition into a WSpec.
    Compile(CompileArgs),
    /// Execute a WSpec against a flow dataset, producing Sankey diagram data.
    Run(RunArgs),
    /// Print summary statistics about a compiled WSpec.
    Inspect(InspectArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Compile(args) => compile::run(&args),
        Command::Run(args) => run::run(&args),
        Command::Inspect(args) => inspect::run(&args),
    }
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
