//! Mesh (loop-current) equations.
//!
//! With tie-set matrix `B`, diagonal impedance `Z`, voltage sources `V` and
//! current sources `J` (all in tree-then-link branch order):
//!
//! ```text
//! (B Z B^T) I_loop = B V - B Z J
//! J_branch = B^T I_loop
//! V_branch = Z (J_branch + J) - V
//! ```

use crate::error::{Result, TiesetError};
use crate::matrix::{Matrix, Scalar, Shape, Tolerance};

/// Diagonal `branches x branches` impedance matrix.
pub fn impedance_matrix<T: Scalar>(resistances: &[T]) -> Matrix<T> {
    Matrix::diagonal(resistances)
}

/// Voltage and current source column vectors `(V, J)`.
pub fn source_vectors<T: Scalar>(
    voltages: &[T],
    currents: &[T],
) -> Result<(Matrix<T>, Matrix<T>)> {
    if voltages.len() != currents.len() {
        return Err(TiesetError::dimension_mismatch(
            "source_vectors",
            Shape::new(voltages.len(), 1),
            Shape::new(currents.len(), 1),
        ));
    }
    Ok((Matrix::column_vector(voltages), Matrix::column_vector(currents)))
}

/// Solve the mesh equations for one current per independent loop.
///
/// A network without loops (no link branches) has nothing to solve and is
/// reported as `SingularMatrix`, as is a singular `B Z B^T`.
pub fn loop_currents<T: Scalar>(
    b: &Matrix<T>,
    impedance: &Matrix<T>,
    current_sources: &Matrix<T>,
    voltage_sources: &Matrix<T>,
    tolerance: Tolerance,
) -> Result<Matrix<T>> {
    if b.rows() == 0 {
        return Err(TiesetError::SingularMatrix);
    }

    let rhs = b
        .multiply(voltage_sources)?
        .subtract(&b.multiply(&impedance.multiply(current_sources)?)?)?;
    let lhs = b.multiply(&impedance.multiply(&b.transpose())?)?;

    lhs.inverse_with(tolerance)?.multiply(&rhs)
}

/// Branch currents `B^T * I_loop`.
pub fn branch_currents<T: Scalar>(loop_currents: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    b.transpose().multiply(loop_currents)
}

/// Branch voltages `Z (J_branch + J) - V`.
pub fn branch_voltages<T: Scalar>(
    branch_currents: &Matrix<T>,
    impedance: &Matrix<T>,
    current_sources: &Matrix<T>,
    voltage_sources: &Matrix<T>,
) -> Result<Matrix<T>> {
    impedance
        .multiply(&branch_currents.add(current_sources)?)?
        .subtract(voltage_sources)
}
