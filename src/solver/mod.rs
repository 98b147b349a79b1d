//! Tie-set (mesh) analysis.
//!
//! This module turns a partitioned branch graph into circuit equations and
//! solves them.
//!
//! ## Pipeline
//!
//! ```text
//! graph -> ordering -> A -> [A_tree | A_link] -> C_link -> {B, C}
//!       -> (B Z B^T) I_loop = B V - B Z J -> J_branch, V_branch
//! ```
//!
//! where:
//! - A is the incidence matrix with columns in tree-then-link order
//! - B is the tie-set matrix, one row per independent loop
//! - C is the cut-set matrix, one row per tree branch
//! - Z is the diagonal branch impedance matrix
//! - V and J are the branch voltage and current source vectors
//!
//! Each stage is a free function returning a new [`Matrix`](crate::matrix::Matrix);
//! [`Analyzer`] runs them in order.

mod analyzer;
mod incidence;
mod mesh;
mod topology;

pub use analyzer::{Analysis, Analyzer, BranchResult, BranchValues, SolverConfig};
pub use incidence::{incidence_matrix, link_incidence, tree_incidence};
pub use mesh::{branch_currents, branch_voltages, impedance_matrix, loop_currents, source_vectors};
pub use topology::{cut_set_link, cut_set_matrix, tie_set_matrix, tie_set_tree};
