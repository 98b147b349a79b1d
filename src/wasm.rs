//! WASM bindings for Tieset Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSolver } from 'tieset_core';
//!
//! await init();
//!
//! const netlist = `
//!   3 3
//!   1 2
//!   2 3
//!   3 1
//!   12 0 0
//!   0 0 0
//!   100 220 680
//! `;
//!
//! const solver = new WasmCircuitSolver(netlist);
//! console.log(solver.branch_order(), solver.branch_currents());
//! ```

use wasm_bindgen::prelude::*;

use crate::matrix::Tolerance;
use crate::netlist;
use crate::report::{render_report, DEFAULT_PRECISION};
use crate::solver::{Analysis, Analyzer, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A solved circuit, built from netlist text.
#[wasm_bindgen]
pub struct WasmCircuitSolver {
    analysis: Analysis,
}

#[wasm_bindgen]
impl WasmCircuitSolver {
    /// Parse and solve a netlist with exact singularity checks.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str) -> Result<WasmCircuitSolver, JsValue> {
        Self::with_tolerance(netlist, 0.0)
    }

    /// Parse and solve a netlist, treating determinants with magnitude at
    /// or below `tolerance` as zero.
    #[wasm_bindgen]
    pub fn with_tolerance(netlist: &str, tolerance: f64) -> Result<WasmCircuitSolver, JsValue> {
        let netlist = netlist::parse(netlist).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let singular_tolerance = if tolerance > 0.0 {
            Tolerance::Absolute(tolerance)
        } else {
            Tolerance::Exact
        };
        let config = SolverConfig::new().with_singular_tolerance(singular_tolerance);

        let analysis = Analyzer::with_config(netlist.graph, config)
            .and_then(|analyzer| analyzer.solve(&netlist.values))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmCircuitSolver { analysis })
    }

    /// Branch labels, tree branches first, separated by spaces.
    #[wasm_bindgen(getter)]
    pub fn branch_order(&self) -> String {
        self.analysis.ordering.to_string()
    }

    /// Number of independent loops.
    #[wasm_bindgen(getter)]
    pub fn loop_count(&self) -> usize {
        self.analysis.loop_currents.rows()
    }

    /// Loop currents, one per link branch.
    pub fn loop_currents(&self) -> Vec<f64> {
        self.analysis.loop_currents.as_slice().to_vec()
    }

    /// Branch currents in branch order.
    pub fn branch_currents(&self) -> Vec<f64> {
        self.analysis.branch_currents.as_slice().to_vec()
    }

    /// Branch voltages in branch order.
    pub fn branch_voltages(&self) -> Vec<f64> {
        self.analysis.branch_voltages.as_slice().to_vec()
    }

    /// Plain-text report with every matrix and the per-branch table.
    pub fn report(&self) -> String {
        render_report(&self.analysis, DEFAULT_PRECISION)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
