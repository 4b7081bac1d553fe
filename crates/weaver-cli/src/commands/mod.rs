//! Subcommand implementations for the `weaver` binary.

pub mod compile;
pub mod inspect;
pub mod run;
