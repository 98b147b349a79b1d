//! # Tieset Core
//!
//! DC analysis of resistive circuits using tie-set (loop) and cut-set
//! matrices.
//!
//! This library provides:
//! - A dense matrix type with Gauss-Jordan inverse, determinant and LU
//! - A directed branch graph with a depth-first tree/link partition
//! - The incidence, tie-set and cut-set matrices of a branch graph
//! - Mesh equations for loop currents, branch currents and branch voltages
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`matrix`] - Dense matrices and linear algebra
//! - [`circuit`] - Branch graph, labels and the tree/link partition
//! - [`solver`] - Topology matrices and mesh equations
//! - [`netlist`] - Reader for the text input format
//! - [`report`] - Prompts and the plain-text result report
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! tieset circuit.net
//! ```
//!
//! ### Library
//!
//! ```
//! use tieset_core::{netlist, Analyzer};
//!
//! let netlist = netlist::parse("3 3  1 2  2 3  3 1  12 0 0  0 0 0  100 220 680").unwrap();
//! let analysis = Analyzer::new(netlist.graph).unwrap().solve(&netlist.values).unwrap();
//! assert!((analysis.loop_currents[(0, 0)] - 0.012).abs() < 1e-12);
//! ```
//!
//! ## Method
//!
//! Branches are ordered tree first, then links. With the reduced incidence
//! matrix split as `[A_tree | A_link]`:
//!
//! 1. `C_link = A_tree^-1 A_link`
//! 2. `B = [-C_link^T | I]` and `C = [I | C_link]`
//! 3. `(B Z B^T) I_loop = B V - B Z J`
//! 4. Branch currents are `B^T I_loop`, branch voltages `Z (J_b + J) - V`

pub mod circuit;
pub mod error;
pub mod matrix;
pub mod netlist;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{BranchLabel, BranchOrdering, DirectedGraph};
pub use error::{Result, TiesetError};
pub use matrix::{identity, Matrix, Tolerance};
pub use solver::{Analysis, Analyzer, BranchValues, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSolver;
