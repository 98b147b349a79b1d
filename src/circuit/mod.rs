//! Circuit branch graph and its tree/link partition.
//!
//! The [`DirectedGraph`] holds the topology read from the netlist. The
//! [`partition`] pass orders its branches into a spanning tree followed by
//! link branches; every matrix in the solver uses that column order.

mod graph;
mod partition;
mod types;
mod validate;

pub use graph::DirectedGraph;
pub use partition::{partition, BranchOrdering};
pub use types::*;
pub use validate::validate_graph;
