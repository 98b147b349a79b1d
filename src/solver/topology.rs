//! Tie-set and cut-set matrices.
//!
//! With the reduced incidence split as `[A_tree | A_link]`:
//!
//! ```text
//! C_link = A_tree^-1 * A_link
//! B      = [ -C_link^T | I ]     (one row per link branch / loop)
//! C      = [ I | C_link ]        (one row per tree branch / cut)
//! ```

use crate::error::{Result, TiesetError};
use crate::matrix::{identity, Matrix, Position, Scalar, Tolerance};

/// `A_tree^-1 * A_link`. Fails with `SingularMatrix` if the tree block
/// does not span the nodes, including a tree with too few or too many
/// branches for a square block.
pub fn cut_set_link<T: Scalar>(
    a_tree: &Matrix<T>,
    a_link: &Matrix<T>,
    tolerance: Tolerance,
) -> Result<Matrix<T>> {
    if !a_tree.is_square() {
        return Err(TiesetError::SingularMatrix);
    }
    a_tree.inverse_with(tolerance)?.multiply(a_link)
}

/// Tree block of the tie-set matrix: `-C_link^T`.
pub fn tie_set_tree<T: Scalar>(c_link: &Matrix<T>) -> Matrix<T> {
    c_link.transpose().negate()
}

/// Tie-set (loop) matrix `B = [B_tree | I]`.
pub fn tie_set_matrix<T: Scalar>(c_link: &Matrix<T>) -> Result<Matrix<T>> {
    tie_set_tree(c_link).concat(&identity(c_link.cols()), Position::ToRight)
}

/// Cut-set matrix `C = [I | C_link]`.
pub fn cut_set_matrix<T: Scalar>(c_link: &Matrix<T>) -> Result<Matrix<T>> {
    identity(c_link.rows()).concat(c_link, Position::ToRight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{partition, DirectedGraph};
    use crate::solver::{incidence_matrix, link_incidence, tree_incidence};

    fn blocks(nodes: usize, pairs: &[(usize, usize)]) -> (Matrix, Matrix) {
        let graph = DirectedGraph::from_one_based(nodes, pairs).unwrap();
        let ordering = partition(&graph);
        let a = incidence_matrix(&graph, &ordering).unwrap();
        (
            tree_incidence(&a, &ordering).unwrap(),
            link_incidence(&a, &ordering).unwrap(),
        )
    }

    #[test]
    fn test_triangle_tie_set_is_single_loop() {
        let (a_tree, a_link) = blocks(3, &[(1, 2), (2, 3), (3, 1)]);
        let c_link = cut_set_link(&a_tree, &a_link, Tolerance::Exact).unwrap();
        assert_eq!(c_link, Matrix::column_vector(&[-1.0, -1.0]));

        let b = tie_set_matrix(&c_link).unwrap();
        assert_eq!(b, Matrix::from_rows(&[vec![1.0, 1.0, 1.0]]).unwrap());

        let c = cut_set_matrix(&c_link).unwrap();
        assert_eq!(
            c,
            Matrix::from_rows(&[vec![1.0, 0.0, -1.0], vec![0.0, 1.0, -1.0]]).unwrap()
        );
    }

    #[test]
    fn test_tie_set_and_cut_set_are_orthogonal() {
        let (a_tree, a_link) = blocks(
            4,
            &[(1, 2), (2, 3), (3, 4), (4, 1), (1, 3), (2, 4)],
        );
        let c_link = cut_set_link(&a_tree, &a_link, Tolerance::Exact).unwrap();
        let b = tie_set_matrix(&c_link).unwrap();
        let c = cut_set_matrix(&c_link).unwrap();

        assert_eq!(b.rows(), 3);
        assert_eq!(c.rows(), 3);
        let product = b.multiply(&c.transpose()).unwrap();
        assert_eq!(product, Matrix::zeros(3, 3));
    }

    #[test]
    fn test_non_square_tree_incidence_is_singular() {
        let a_tree = Matrix::column_vector(&[1.0, 0.0]);
        let a_link = Matrix::column_vector(&[-1.0, 0.0]);
        assert!(matches!(
            cut_set_link(&a_tree, &a_link, Tolerance::Exact),
            Err(TiesetError::SingularMatrix)
        ));
    }

    #[test]
    fn test_zero_row_tree_incidence_is_singular() {
        let a_tree = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let a_link = Matrix::column_vector(&[1.0, 0.0]);
        assert!(matches!(
            cut_set_link(&a_tree, &a_link, Tolerance::Exact),
            Err(TiesetError::SingularMatrix)
        ));
    }
}
