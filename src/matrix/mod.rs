//! Dense matrix arithmetic for the circuit equations.
//!
//! [`Matrix`] is a small row-major container with value semantics: every
//! algebraic operation returns a new matrix and never resizes its operands.
//! The only in-place operation is [`Matrix::reduced_row_echelon`], which
//! tracks pivot order through a row permutation instead of swapping rows.
//!
//! Branch counts in this domain are small (tens of branches), so the
//! algorithms favour clarity over asymptotic speed. The determinant in
//! particular is a recursive cofactor expansion.

mod elimination;
mod ops;
mod tolerance;

use std::fmt;
use std::ops::{Index, IndexMut, Range};

use num_traits::Float;

use crate::error::{Result, TiesetError};

pub use tolerance::Tolerance;

/// Element type of a [`Matrix`].
pub trait Scalar: Float + fmt::Debug + fmt::Display + 'static {}

impl<T> Scalar for T where T: Float + fmt::Debug + fmt::Display + 'static {}

/// Row and column count of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of an `n x n` matrix.
    pub fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Side on which a matrix is appended by [`Matrix::concat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// `[self | other]`, requires equal row counts
    ToRight,
    /// `[self ; other]`, requires equal column counts
    ToBottom,
}

/// A dense `rows x cols` matrix stored row-major.
#[derive(Debug, Clone)]
pub struct Matrix<T: Scalar = f64> {
    rows: usize,
    cols: usize,
    /// Elements, row-major
    data: Vec<T>,
    /// Logical row order produced by row reduction.
    /// Physical row `order[i]` is the i-th row in pivot order.
    order: Vec<usize>,
}

/// Build an `n x n` identity matrix.
///
/// The result is an ordinary [`Matrix`]; nothing marks it as an identity
/// after construction.
pub fn identity<T: Scalar>(size: usize) -> Matrix<T> {
    let mut matrix = Matrix::zeros(size, size);
    for i in 0..size {
        matrix[(i, i)] = T::one();
    }
    matrix
}

impl<T: Scalar> Matrix<T> {
    /// Create a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
            order: (0..rows).collect(),
        }
    }

    /// Create an identity matrix. Same as [`identity`].
    pub fn identity(size: usize) -> Self {
        identity(size)
    }

    /// Create a matrix from row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TiesetError::dimension_mismatch(
                "from_vec",
                Shape::new(rows, cols),
                Shape::new(1, data.len()),
            ));
        }
        Ok(Self {
            rows,
            cols,
            data,
            order: (0..rows).collect(),
        })
    }

    /// Create a matrix from a list of rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TiesetError::dimension_mismatch(
                    "from_rows",
                    Shape::new(1, cols),
                    Shape::new(1, row.len()),
                ));
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Create an `n x 1` column vector.
    pub fn column_vector(values: &[T]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
            order: (0..values.len()).collect(),
        }
    }

    /// Create a square matrix with `values` on the diagonal.
    pub fn diagonal(values: &[T]) -> Self {
        let mut matrix = Self::zeros(values.len(), values.len());
        for (i, &value) in values.iter().enumerate() {
            matrix[(i, i)] = value;
        }
        matrix
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major view of the elements.
    ///
    /// For a column vector this is simply its entries in order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Current row permutation (identity unless the matrix was row-reduced).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_bounds(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_bounds(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(self.out_of_range(row, col));
        }
        Ok(())
    }

    fn out_of_range(&self, row: usize, col: usize) -> TiesetError {
        TiesetError::OutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Copy the block spanning `row_start..=row_end` and `col_start..=col_end`.
    ///
    /// Bounds are inclusive, so `(0, rows - 1, 0, cols - 1)` copies the whole matrix.
    pub fn submatrix(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<Self> {
        check_inclusive(self, row_start, row_end, col_start, col_end)?;
        self.block(row_start..row_end + 1, col_start..col_end + 1, None)
    }

    /// Like [`Matrix::submatrix`], but logical row `r` is read from physical
    /// row `row_order[r]`. Used to read a row-reduced matrix in pivot order.
    pub fn submatrix_ordered(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
        row_order: &[usize],
    ) -> Result<Self> {
        check_inclusive(self, row_start, row_end, col_start, col_end)?;
        self.block(
            row_start..row_end + 1,
            col_start..col_end + 1,
            Some(row_order),
        )
    }

    /// Copy a half-open block. Either range may be empty.
    pub fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        self.block(rows, cols, None)
    }

    fn block(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
        row_order: Option<&[usize]>,
    ) -> Result<Self> {
        if rows.start > rows.end || rows.end > self.rows {
            return Err(TiesetError::OutOfRange {
                row: rows.end.saturating_sub(1).max(rows.start),
                col: cols.start,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if cols.start > cols.end || cols.end > self.cols {
            return Err(TiesetError::OutOfRange {
                row: rows.start,
                col: cols.end.saturating_sub(1).max(cols.start),
                rows: self.rows,
                cols: self.cols,
            });
        }
        if let Some(order) = row_order {
            if order.len() < rows.end || order.iter().any(|&r| r >= self.rows) {
                return Err(TiesetError::dimension_mismatch(
                    "submatrix_ordered",
                    self.shape(),
                    Shape::new(order.len(), 1),
                ));
            }
        }

        let mut result = Self::zeros(rows.len(), cols.len());
        for (new_row, row) in rows.enumerate() {
            let source_row = row_order.map_or(row, |order| order[row]);
            for (new_col, col) in cols.clone().enumerate() {
                result[(new_row, new_col)] = self[(source_row, col)];
            }
        }
        Ok(result)
    }

    /// Return a single row as a `1 x cols` matrix.
    pub fn row(&self, row: usize) -> Result<Self> {
        if row >= self.rows {
            return Err(self.out_of_range(row, 0));
        }
        self.slice(row..row + 1, 0..self.cols)
    }

    /// Return a single column as a `rows x 1` matrix.
    pub fn column(&self, col: usize) -> Result<Self> {
        if col >= self.cols {
            return Err(self.out_of_range(0, col));
        }
        self.slice(0..self.rows, col..col + 1)
    }

    /// Copy this matrix, leaving out one row and/or one column.
    pub fn without(&self, omit_row: Option<usize>, omit_col: Option<usize>) -> Result<Self> {
        let out_of_range = omit_row.is_some_and(|row| row >= self.rows)
            || omit_col.is_some_and(|col| col >= self.cols);
        if out_of_range {
            return Err(TiesetError::OutOfRange {
                row: omit_row.unwrap_or(0),
                col: omit_col.unwrap_or(0),
                rows: self.rows,
                cols: self.cols,
            });
        }

        let rows = self.rows - usize::from(omit_row.is_some());
        let cols = self.cols - usize::from(omit_col.is_some());
        let mut data = Vec::with_capacity(rows * cols);
        for row in (0..self.rows).filter(|&r| Some(r) != omit_row) {
            for col in (0..self.cols).filter(|&c| Some(c) != omit_col) {
                data.push(self[(row, col)]);
            }
        }
        Self::from_vec(rows, cols, data)
    }

    /// Compose two matrices into a block matrix.
    pub fn concat(&self, other: &Self, position: Position) -> Result<Self> {
        match position {
            Position::ToRight => {
                if self.rows != other.rows {
                    return Err(TiesetError::dimension_mismatch(
                        "concat",
                        self.shape(),
                        other.shape(),
                    ));
                }
                let mut result = Self::zeros(self.rows, self.cols + other.cols);
                for row in 0..self.rows {
                    for col in 0..self.cols {
                        result[(row, col)] = self[(row, col)];
                    }
                    for col in 0..other.cols {
                        result[(row, self.cols + col)] = other[(row, col)];
                    }
                }
                Ok(result)
            }
            Position::ToBottom => {
                if self.cols != other.cols {
                    return Err(TiesetError::dimension_mismatch(
                        "concat",
                        self.shape(),
                        other.shape(),
                    ));
                }
                let mut data = Vec::with_capacity(self.data.len() + other.data.len());
                data.extend_from_slice(&self.data);
                data.extend_from_slice(&other.data);
                Self::from_vec(self.rows + other.rows, self.cols, data)
            }
        }
    }

    /// Return the `cols x rows` transpose.
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.cols, self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                result[(col, row)] = self[(row, col)];
            }
        }
        result
    }
}

fn check_inclusive<T: Scalar>(
    matrix: &Matrix<T>,
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
) -> Result<()> {
    if row_start > row_end || col_start > col_end {
        return Err(matrix.out_of_range(row_start, col_start));
    }
    // Both ends must be valid indices before `end + 1` is formed
    matrix.check_bounds(row_end, col_end)
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

/// Exact element-wise equality. The row permutation is not compared.
impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

/// One row per line, elements separated by a single space.
impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                match f.precision() {
                    Some(precision) => write!(f, "{:.*}", precision, self[(row, col)])?,
                    None => write!(f, "{}", self[(row, col)])?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn test_get_set_bounds() {
        let mut a = Matrix::<f64>::zeros(2, 3);
        a.set(1, 2, 5.0).unwrap();
        assert_eq!(a.get(1, 2).unwrap(), 5.0);

        assert!(matches!(
            a.get(2, 0),
            Err(TiesetError::OutOfRange { row: 2, col: 0, rows: 2, cols: 3 })
        ));
        assert!(matches!(a.set(0, 3, 1.0), Err(TiesetError::OutOfRange { .. })));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(TiesetError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_submatrix_inclusive_bounds() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(a.submatrix(0, 2, 0, 2).unwrap(), a);
        assert_eq!(a.submatrix(1, 2, 1, 1).unwrap(), Matrix::column_vector(&[5.0, 8.0]));
        assert_eq!(a.submatrix(2, 2, 0, 0).unwrap(), m(&[&[7.0]]));

        assert!(matches!(a.submatrix(0, 3, 0, 0), Err(TiesetError::OutOfRange { .. })));
        assert!(matches!(a.submatrix(2, 1, 0, 0), Err(TiesetError::OutOfRange { .. })));
    }

    #[test]
    fn test_submatrix_end_at_usize_max() {
        let a = Matrix::<f64>::zeros(2, 2);
        assert!(matches!(
            a.submatrix(0, usize::MAX, 0, 0),
            Err(TiesetError::OutOfRange { .. })
        ));
        assert!(matches!(
            a.submatrix_ordered(0, 0, 0, usize::MAX, &[1, 0]),
            Err(TiesetError::OutOfRange { .. })
        ));
        assert!(a.row(usize::MAX).is_err());
        assert!(a.column(usize::MAX).is_err());
    }

    #[test]
    fn test_submatrix_ordered_reads_through_order() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let swapped = a.submatrix_ordered(0, 1, 0, 1, &[1, 0]).unwrap();
        assert_eq!(swapped, m(&[&[3.0, 4.0], &[1.0, 2.0]]));
    }

    #[test]
    fn test_concat_both_directions() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[3.0, 4.0]]);
        assert_eq!(
            a.concat(&b, Position::ToBottom).unwrap(),
            m(&[&[1.0, 2.0], &[3.0, 4.0]])
        );
        assert_eq!(a.concat(&b, Position::ToRight).unwrap(), m(&[&[1.0, 2.0, 3.0, 4.0]]));
    }

    #[test]
    fn test_concat_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2);
        let tall = Matrix::<f64>::zeros(3, 2);
        let wide = Matrix::<f64>::zeros(2, 3);
        assert!(matches!(
            a.concat(&tall, Position::ToRight),
            Err(TiesetError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            a.concat(&wide, Position::ToBottom),
            Err(TiesetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_without_row_and_column() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(a.without(Some(0), Some(1)).unwrap(), m(&[&[4.0, 6.0], &[7.0, 9.0]]));
        assert_eq!(a.without(None, Some(2)).unwrap().shape(), Shape::new(3, 2));
        assert_eq!(a.without(Some(1), None).unwrap().row(1).unwrap(), m(&[&[7.0, 8.0, 9.0]]));
        assert!(matches!(a.without(Some(3), None), Err(TiesetError::OutOfRange { .. })));
    }

    #[test]
    fn test_display_honours_precision() {
        let a = m(&[&[1.0, 0.5], &[-2.0, 0.25]]);
        assert_eq!(format!("{:.2}", a), "1.00 0.50\n-2.00 0.25\n");
    }
}
