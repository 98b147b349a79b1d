//! Zero and equality tolerance for floating-point matrices.
//!
//! Elimination and `PartialEq` compare exactly. Callers that want slack pass
//! a [`Tolerance`] explicitly, or use the `approx` traits implemented here.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::NumCast;

use super::{Matrix, Scalar};

/// How close to zero a value must be to count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Tolerance {
    /// Only an exact zero is zero
    #[default]
    Exact,
    /// `|x| <= epsilon` is zero
    Absolute(f64),
}

impl Tolerance {
    pub fn is_zero<T: Scalar>(&self, value: T) -> bool {
        match *self {
            Tolerance::Exact => value == T::zero(),
            Tolerance::Absolute(epsilon) => {
                value.abs() <= <T as NumCast>::from(epsilon.abs()).unwrap_or_else(T::zero)
            }
        }
    }

    pub fn equal<T: Scalar>(&self, a: T, b: T) -> bool {
        a == b || self.is_zero(a - b)
    }
}

impl<T: Scalar> Matrix<T> {
    /// Element-wise comparison under `tolerance`. Shapes must match exactly.
    pub fn approx_eq(&self, other: &Self, tolerance: Tolerance) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| tolerance.equal(a, b))
    }
}

impl<T> AbsDiffEq for Matrix<T>
where
    T: Scalar + AbsDiffEq<Epsilon = T>,
{
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T> RelativeEq for Matrix<T>
where
    T: Scalar + RelativeEq<Epsilon = T>,
{
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_is_zero() {
        assert!(Tolerance::Exact.is_zero(0.0));
        assert!(Tolerance::Exact.is_zero(-0.0));
        assert!(!Tolerance::Exact.is_zero(1e-300));
        assert!(Tolerance::Absolute(1e-9).is_zero(-5e-10));
        assert!(!Tolerance::Absolute(1e-9).is_zero(2e-9));
    }

    #[test]
    fn test_matrix_approx_eq() {
        let a = Matrix::column_vector(&[0.1 + 0.2, 1.0]);
        let b = Matrix::column_vector(&[0.3, 1.0]);
        assert_ne!(a, b);
        assert!(!a.approx_eq(&b, Tolerance::Exact));
        assert!(a.approx_eq(&b, Tolerance::Absolute(1e-12)));
        assert!(!a.approx_eq(&b.transpose(), Tolerance::Absolute(1.0)));
        approx::assert_relative_eq!(a, b);
    }
}
