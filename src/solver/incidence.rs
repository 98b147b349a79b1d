//! Incidence matrix and its tree/link blocks.

use crate::circuit::{BranchOrdering, DirectedGraph};
use crate::error::{Result, TiesetError};
use crate::matrix::{Matrix, Scalar};

/// Build the `nodes x branches` incidence matrix.
///
/// Columns follow `ordering` (tree branches first). The column of branch
/// `u -> v` holds `+1` in row `u` and `-1` in row `v`.
pub fn incidence_matrix<T: Scalar>(
    graph: &DirectedGraph,
    ordering: &BranchOrdering,
) -> Result<Matrix<T>> {
    if ordering.len() != graph.branch_count() {
        return Err(TiesetError::malformed_graph(format!(
            "branch ordering has {} labels for {} branches",
            ordering.len(),
            graph.branch_count()
        )));
    }

    let mut a = Matrix::zeros(graph.node_count(), graph.branch_count());
    for (col, &label) in ordering.labels().iter().enumerate() {
        let (from, to) = graph.endpoints(label).ok_or_else(|| {
            TiesetError::malformed_graph(format!("branch {} is not in the graph", label))
        })?;
        a.set(from.0, col, T::one())?;
        a.set(to.0, col, -T::one())?;
    }
    Ok(a)
}

/// Reduced incidence of the tree branches: the first `tree_count` columns,
/// without the last (dependent) node row.
pub fn tree_incidence<T: Scalar>(a: &Matrix<T>, ordering: &BranchOrdering) -> Result<Matrix<T>> {
    a.slice(0..a.rows().saturating_sub(1), 0..ordering.tree_count())
}

/// Reduced incidence of the link branches: the remaining columns, without
/// the last node row.
pub fn link_incidence<T: Scalar>(a: &Matrix<T>, ordering: &BranchOrdering) -> Result<Matrix<T>> {
    a.slice(
        0..a.rows().saturating_sub(1),
        ordering.tree_count()..a.cols(),
    )
}
