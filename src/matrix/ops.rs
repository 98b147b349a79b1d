//! Element-wise and product operators.

use super::{Matrix, Scalar};
use crate::error::{Result, TiesetError};

impl<T: Scalar> Matrix<T> {
    /// Element-wise sum.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Element-wise difference.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    fn zip_with(&self, other: &Self, operation: &'static str, f: impl Fn(T, T) -> T) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(TiesetError::dimension_mismatch(
                operation,
                self.shape(),
                other.shape(),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self::from_vec(self.rows, self.cols, data)
    }

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(TiesetError::dimension_mismatch(
                "multiply",
                self.shape(),
                other.shape(),
            ));
        }

        let mut result = Self::zeros(self.rows, other.cols);
        for row in 0..self.rows {
            for col in 0..other.cols {
                let mut sum = T::zero();
                for k in 0..self.cols {
                    sum = sum + self[(row, k)] * other[(k, col)];
                }
                result[(row, col)] = sum;
            }
        }
        Ok(result)
    }

    /// Multiply every element by a scalar.
    pub fn scale(&self, scalar: T) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| v * scalar).collect(),
            order: (0..self.rows).collect(),
        }
    }

    pub fn negate(&self) -> Self {
        self.scale(-T::one())
    }

    /// Sum of element-wise products. Both operands must have the same shape.
    pub fn dot_product(&self, other: &Self) -> Result<T> {
        if self.shape() != other.shape() {
            return Err(TiesetError::dimension_mismatch(
                "dot_product",
                self.shape(),
                other.shape(),
            ));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }
}
