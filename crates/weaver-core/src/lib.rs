#![deny(missing_docs)]

//! Data model and error types shared by the Weaver compiler and executor.
//!
//! This crate defines the SDD (input) and WSpec (output) type families,
//! plus the error taxonomy and small value/row abstractions the rest of
//! the workspace builds on. It has no knowledge of how a WSpec is
//! produced or consumed.

pub mod error;
pub mod ids;
pub mod provenance;
pub mod sdd;
pub mod value;
pub mod wspec;

pub use error::{ErrorInfo, WeaverError};
pub use ids::{BundleId, Direction, EdgeId, NodeId, NodeRef};
pub use provenance::{Provenance, SchemaVersion};
pub use sdd::{
    Bundle, Ordering, Partition, PartitionGroup, ProcessSelection, SankeyDefinition, SddNode,
    Selection, ValueMatch,
};
pub use value::{Row, Value};
pub use wspec::{
    Aggregation, ColorSpec, DisplaySpec, EdgeSpec, GroupSpec, MeasureSpec, NodeKind, NodeSpec,
    Tree, WSpec,
};
