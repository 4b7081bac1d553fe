#![deny(missing_docs)]

//! Bundle expansion (ViewGraph) and partition cross-product
//! (PartitionCross) for the Weaver compiler.

pub mod cross;
pub mod view;

pub use cross::{cross_product, ConcreteEdge};
pub use view::{expand, ViewBundle};
