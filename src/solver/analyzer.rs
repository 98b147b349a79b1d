//! Main analysis pipeline.

use log::{debug, warn};

use crate::circuit::{partition, validate_graph, BranchLabel, BranchOrdering, DirectedGraph};
use crate::error::{Result, TiesetError};
use crate::matrix::{Matrix, Scalar, Shape, Tolerance};

use super::incidence::{incidence_matrix, link_incidence, tree_incidence};
use super::mesh::{branch_currents, branch_voltages, impedance_matrix, loop_currents, source_vectors};
use super::topology::{cut_set_link, cut_set_matrix, tie_set_matrix};

/// Configuration for the analyzer.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Determinants within this tolerance of zero are treated as singular.
    pub singular_tolerance: Tolerance,
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the singularity tolerance used for every matrix inversion.
    ///
    /// The default, [`Tolerance::Exact`], only rejects an exactly zero
    /// determinant. Resistances with many significant digits can leave a
    /// near-zero determinant for a network that is singular in theory.
    pub fn with_singular_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.singular_tolerance = tolerance;
        self
    }
}

/// Per-branch source and resistance values, in tree-then-link order.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchValues<T: Scalar = f64> {
    pub voltage_sources: Vec<T>,
    pub current_sources: Vec<T>,
    pub resistances: Vec<T>,
}

impl<T: Scalar> BranchValues<T> {
    pub fn new(voltage_sources: Vec<T>, current_sources: Vec<T>, resistances: Vec<T>) -> Self {
        Self {
            voltage_sources,
            current_sources,
            resistances,
        }
    }

    fn check_len(&self, branch_count: usize) -> Result<()> {
        for values in [&self.voltage_sources, &self.current_sources, &self.resistances] {
            if values.len() != branch_count {
                return Err(TiesetError::dimension_mismatch(
                    "branch values",
                    Shape::new(values.len(), 1),
                    Shape::new(branch_count, 1),
                ));
            }
        }
        Ok(())
    }
}

/// Voltage and current of one branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchResult<T: Scalar = f64> {
    pub label: BranchLabel,
    pub voltage: T,
    pub current: T,
}

/// Every matrix produced by a successful analysis.
#[derive(Debug, Clone)]
pub struct Analysis<T: Scalar = f64> {
    /// Branch order used for every column and vector below
    pub ordering: BranchOrdering,
    /// Incidence matrix A (nodes x branches)
    pub incidence: Matrix<T>,
    /// Tie-set matrix B (loops x branches)
    pub tie_set: Matrix<T>,
    /// Cut-set matrix C (tree branches x branches)
    pub cut_set: Matrix<T>,
    /// One current per independent loop
    pub loop_currents: Matrix<T>,
    pub branch_currents: Matrix<T>,
    pub branch_voltages: Matrix<T>,
}

impl<T: Scalar> Analysis<T> {
    /// `(label, voltage, current)` for each branch in tree-then-link order.
    pub fn branch_results(&self) -> Vec<BranchResult<T>> {
        self.ordering
            .labels()
            .iter()
            .zip(self.branch_voltages.as_slice())
            .zip(self.branch_currents.as_slice())
            .map(|((&label, &voltage), &current)| BranchResult {
                label,
                voltage,
                current,
            })
            .collect()
    }
}

/// Tie-set analyzer for one branch graph.
///
/// Construction validates and partitions the graph, so callers can ask for
/// branch values in [`Analyzer::ordering`] before solving.
#[derive(Debug, Clone)]
pub struct Analyzer {
    graph: DirectedGraph,
    ordering: BranchOrdering,
    config: SolverConfig,
}

impl Analyzer {
    /// Create an analyzer with default configuration.
    pub fn new(graph: DirectedGraph) -> Result<Self> {
        Self::with_config(graph, SolverConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(graph: DirectedGraph, config: SolverConfig) -> Result<Self> {
        validate_graph(&graph)?;
        let ordering = partition(&graph);

        let expected = graph.node_count() - 1;
        if ordering.tree_count() != expected {
            warn!(
                "spanning structure has {} tree branches, expected {}; the tree incidence will not be square",
                ordering.tree_count(),
                expected
            );
        }

        Ok(Self {
            graph,
            ordering,
            config,
        })
    }

    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// Branch order (tree then link) expected by [`Analyzer::solve`].
    pub fn ordering(&self) -> &BranchOrdering {
        &self.ordering
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run the full pipeline. Nothing is returned unless every step succeeds.
    pub fn solve<T: Scalar>(&self, values: &BranchValues<T>) -> Result<Analysis<T>> {
        values.check_len(self.graph.branch_count())?;
        let tolerance = self.config.singular_tolerance;

        let incidence = incidence_matrix(&self.graph, &self.ordering)?;
        let a_tree = tree_incidence(&incidence, &self.ordering)?;
        let a_link = link_incidence(&incidence, &self.ordering)?;
        debug!("A_tree {}, A_link {}", a_tree.shape(), a_link.shape());

        let c_link = cut_set_link(&a_tree, &a_link, tolerance)?;
        let tie_set = tie_set_matrix(&c_link)?;
        let cut_set = cut_set_matrix(&c_link)?;
        debug!("B {}, C {}", tie_set.shape(), cut_set.shape());

        let impedance = impedance_matrix(&values.resistances);
        let (voltage_sources, current_sources) =
            source_vectors(&values.voltage_sources, &values.current_sources)?;

        let loop_currents = loop_currents(
            &tie_set,
            &impedance,
            &current_sources,
            &voltage_sources,
            tolerance,
        )?;
        let branch_currents = branch_currents(&loop_currents, &tie_set)?;
        let branch_voltages =
            branch_voltages(&branch_currents, &impedance, &current_sources, &voltage_sources)?;
        debug!("solved {} loop currents", loop_currents.rows());

        Ok(Analysis {
            ordering: self.ordering.clone(),
            incidence,
            tie_set,
            cut_set,
            loop_currents,
            branch_currents,
            branch_voltages,
        })
    }
}
