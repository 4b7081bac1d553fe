#![deny(missing_docs)]

//! Decision-tree routing: the `Tree` type lives in `weaver-core` (it is
//! part of the WSpec wire format); this crate provides the evaluator and
//! the two-pass builder that constructs one from a compiler's rules.

pub mod build;
pub mod eval;

pub use build::{branch_order, build, Constraint, RouterRule};
pub use eval::route;
