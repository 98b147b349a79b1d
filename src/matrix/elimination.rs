//! Row reduction, inversion, determinant and LU factorization.

use log::trace;

use super::{identity, Matrix, Position, Scalar, Shape, Tolerance};
use crate::error::{Result, TiesetError};

impl<T: Scalar> Matrix<T> {
    /// Number of leading zero entries in a physical row.
    fn leading_zeros(&self, row: usize) -> usize {
        (0..self.cols)
            .take_while(|&col| self[(row, col)] == T::zero())
            .count()
    }

    /// Sort the logical rows from `start` onward so that rows with fewer
    /// leading zeros come first. Only `order` changes; rows are never moved.
    fn reorder(&mut self, start: usize) {
        let zeros: Vec<usize> = (0..self.rows).map(|row| self.leading_zeros(row)).collect();
        self.order[start..].sort_by_key(|&row| zeros[row]);
    }

    /// Divide a physical row by `divisor`.
    fn divide_row(&mut self, row: usize, divisor: T) {
        for col in 0..self.cols {
            self[(row, col)] = self[(row, col)] / divisor;
        }
    }

    /// `row += add_row * scale` on physical rows.
    fn row_operation(&mut self, row: usize, add_row: usize, scale: T) {
        for col in 0..self.cols {
            self[(row, col)] = self[(row, col)] + self[(add_row, col)] * scale;
        }
    }

    /// Put the matrix in reduced row echelon form (Gauss-Jordan).
    ///
    /// Rows are never swapped. The pivot order is recorded in
    /// [`Matrix::order`]; read results through it with
    /// [`Matrix::submatrix_ordered`].
    ///
    /// An all-zero row has no pivot and is left untouched, so a singular
    /// operand yields a matrix that is not a valid reduction. Check the
    /// determinant first when that matters.
    pub fn reduced_row_echelon(&mut self) {
        self.order = (0..self.rows).collect();
        for row_index in 0..self.rows {
            self.reorder(row_index);

            let row = self.order[row_index];
            let col = self.leading_zeros(row);
            if col == self.cols {
                trace!("rref: row {} has no pivot, skipping", row);
                continue;
            }

            let divisor = self[(row, col)];
            self.divide_row(row, divisor);

            for sub_index in (row_index + 1)..self.rows {
                let sub_row = self.order[sub_index];
                let factor = self[(sub_row, col)];
                if factor != T::zero() {
                    self.row_operation(sub_row, row, -factor);
                }
            }
        }

        // Back substitute, clearing each pivot column above its pivot
        for row_index in (1..self.rows).rev() {
            let row = self.order[row_index];
            let col = self.leading_zeros(row);
            if col == self.cols {
                continue;
            }
            for sub_index in 0..row_index {
                let sub_row = self.order[sub_index];
                let factor = self[(sub_row, col)];
                if factor != T::zero() {
                    self.row_operation(sub_row, row, -factor);
                }
            }
        }
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// Cost grows factorially with size.
    pub fn determinant(&self) -> Result<T> {
        if !self.is_square() {
            return Err(TiesetError::dimension_mismatch(
                "determinant",
                self.shape(),
                Shape::square(self.rows),
            ));
        }

        match self.rows {
            0 => Ok(T::one()),
            1 => Ok(self[(0, 0)]),
            2 => Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]),
            _ => {
                let mut result = T::zero();
                for col in 0..self.cols {
                    let entry = self[(0, col)];
                    if entry == T::zero() {
                        continue;
                    }
                    let minor = self.without(Some(0), Some(col))?.determinant()?;
                    if col % 2 == 0 {
                        result = result + entry * minor;
                    } else {
                        result = result - entry * minor;
                    }
                }
                Ok(result)
            }
        }
    }

    /// Inverse with an exact zero-determinant check.
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(Tolerance::Exact)
    }

    /// Inverse, treating a determinant within `tolerance` of zero as singular.
    ///
    /// Built by row-reducing `[self | I]` and reading the right-hand block
    /// back in pivot order.
    pub fn inverse_with(&self, tolerance: Tolerance) -> Result<Self> {
        if !self.is_square() {
            return Err(TiesetError::dimension_mismatch(
                "inverse",
                self.shape(),
                Shape::square(self.rows),
            ));
        }

        let det = self.determinant()?;
        if tolerance.is_zero(det) {
            return Err(TiesetError::SingularMatrix);
        }

        let n = self.rows;
        let mut augmented = self.concat(&identity(n), Position::ToRight)?;
        augmented.reduced_row_echelon();

        let order = augmented.order.clone();
        augmented.block(0..n, n..2 * n, Some(&order))
    }

    /// LU factorization without pivoting. Returns `(lower, upper)` with
    /// `lower * upper == self`.
    ///
    /// `upper` has a unit diagonal and `lower` carries the pivots. A zero
    /// pivot leaves its row undivided; if rows below still need elimination
    /// the factorization is wrong. No row exchange is attempted.
    pub fn lu_decompose(&self) -> Result<(Self, Self)> {
        if !self.is_square() {
            return Err(TiesetError::dimension_mismatch(
                "lu_decompose",
                self.shape(),
                Shape::square(self.rows),
            ));
        }

        let n = self.rows;
        let mut upper = self.clone();
        let mut lower = Self::zeros(n, n);

        for row in 0..n {
            let pivot = upper[(row, row)];
            if pivot != T::zero() {
                upper.divide_row(row, pivot);
                lower[(row, row)] = pivot;
            }

            for sub_row in (row + 1)..n {
                let value = upper[(sub_row, row)];
                upper.row_operation(sub_row, row, -value);
                lower[(sub_row, row)] = value;
            }
        }

        Ok((lower, upper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_rref_starts_from_identity_order() {
        let mut a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        a.reduced_row_echelon();
        assert_eq!(a.order(), &[1, 0]);

        // Reuse the reduced matrix with new contents whose rows tie
        for (row, values) in [[1.0, 2.0], [1.0, 3.0]].iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                a.set(row, col, value).unwrap();
            }
        }
        a.reduced_row_echelon();
        assert_eq!(a.order(), &[0, 1]);
        assert_eq!(a, m(&[&[1.0, 0.0], &[0.0, 1.0]]));
    }

    #[test]
    fn test_determinant_2x2() {
        assert_eq!(m(&[&[3.0, 8.0], &[4.0, 6.0]]).determinant().unwrap(), -14.0);
        assert_eq!(m(&[&[-2.0, 0.0], &[5.0, -3.0]]).determinant().unwrap(), 6.0);
        assert_eq!(m(&[&[0.0, 0.0], &[1.0, 7.0]]).determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_small_and_large() {
        assert_eq!(Matrix::<f64>::zeros(0, 0).determinant().unwrap(), 1.0);
        assert_eq!(m(&[&[-4.5]]).determinant().unwrap(), -4.5);

        let a = m(&[&[6.0, 1.0, 1.0], &[4.0, -2.0, 5.0], &[2.0, 8.0, 7.0]]);
        assert_eq!(a.determinant().unwrap(), -306.0);

        let b = m(&[
            &[1.0, 0.0, 2.0, -1.0],
            &[3.0, 0.0, 0.0, 5.0],
            &[2.0, 1.0, 4.0, -3.0],
            &[1.0, 0.0, 5.0, 0.0],
        ]);
        assert_eq!(b.determinant().unwrap(), 30.0);
    }

    #[test]
    fn test_determinant_requires_square() {
        assert!(matches!(
            Matrix::<f64>::zeros(2, 3).determinant(),
            Err(TiesetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rref_identity_on_left() {
        let mut a = m(&[&[0.0, 2.0, 4.0], &[1.0, 1.0, 1.0]]);
        a.reduced_row_echelon();
        // The row with the leading 1 was processed first
        assert_eq!(a.order(), &[1, 0]);
        let ordered = a.submatrix_ordered(0, 1, 0, 2, &a.order().to_vec()).unwrap();
        assert_eq!(ordered, m(&[&[1.0, 0.0, -1.0], &[0.0, 1.0, 2.0]]));
    }

    #[test]
    fn test_rref_zero_row_is_skipped() {
        let mut a = m(&[&[0.0, 0.0], &[2.0, 4.0]]);
        a.reduced_row_echelon();
        let ordered = a.submatrix_ordered(0, 1, 0, 1, &a.order().to_vec()).unwrap();
        assert_eq!(ordered, m(&[&[1.0, 2.0], &[0.0, 0.0]]));
    }

    #[test]
    fn test_inverse() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = a.inverse().unwrap();
        assert_abs_diff_eq!(inv, m(&[&[0.6, -0.7], &[-0.2, 0.4]]), epsilon = 1e-12);
        assert_abs_diff_eq!(a.multiply(&inv).unwrap(), identity(2), epsilon = 1e-12);
        assert_abs_diff_eq!(inv.inverse().unwrap(), a, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_needs_row_reordering() {
        let a = m(&[&[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0]]);
        let inv = a.inverse().unwrap();
        assert_eq!(inv, a.transpose());
    }

    #[test]
    fn test_inverse_singular() {
        let a = m(&[&[1.0, -1.0], &[0.0, 0.0]]);
        assert!(matches!(a.inverse(), Err(TiesetError::SingularMatrix)));
        assert!(matches!(
            Matrix::<f64>::zeros(2, 3).inverse(),
            Err(TiesetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_inverse_with_tolerance() {
        let a = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-13]]);
        assert!(a.inverse().is_ok());
        assert!(matches!(
            a.inverse_with(Tolerance::Absolute(1e-9)),
            Err(TiesetError::SingularMatrix)
        ));
    }

    #[test]
    fn test_lu_round_trip() {
        let a = m(&[&[4.0, 3.0, 2.0], &[6.0, 3.0, 1.0], &[2.0, 5.0, 7.0]]);
        let (lower, upper) = a.lu_decompose().unwrap();

        for row in 0..3 {
            assert_eq!(upper[(row, row)], 1.0);
            for col in 0..row {
                assert_eq!(upper[(row, col)], 0.0);
            }
            for col in (row + 1)..3 {
                assert_eq!(lower[(row, col)], 0.0);
            }
        }
        assert_abs_diff_eq!(lower.multiply(&upper).unwrap(), a, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_2x2_values() {
        let a = m(&[&[4.0, 3.0], &[6.0, 3.0]]);
        let (lower, upper) = a.lu_decompose().unwrap();
        assert_eq!(lower, m(&[&[4.0, 0.0], &[6.0, -1.5]]));
        assert_eq!(upper, m(&[&[1.0, 0.75], &[0.0, 1.0]]));
    }
}
