//! The diagonal bilinear form of each geometry and the inner product it induces.
//!
//! # Mathematical Definition
//!
//! ```text
//! Spherical / Euclidean: M = diag(1, …, 1)
//! Hyperbolic:            M = diag(1, …, 1, -1)      (Minkowski)
//! ⟨u, v⟩ = uᵀ M v
//! ```
//!
//! The metric is diagonal, so the inner product is evaluated directly from the
//! signature without materialising `M`. [`get_metric`] builds the dense matrix
//! for callers that need it.
//!
//! Single vectors and batches go through the same column kernel: a batch is a
//! `(d+1) × m` matrix whose columns are independent points, and
//! [`dot_batch`] returns the `m` column-wise inner products (not the `m × m`
//! cross matrix).

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::numerical::{clamped_sqrt, ensure_nonempty, ensure_same_len, ensure_same_shape};
use crate::types::{DMatrix, DVector, Scalar};
use nalgebra::{storage::Storage, Dyn, Matrix, U1};
use std::marker::PhantomData;

/// Diagonal metric of a given ambient dimension and geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric<T> {
    dimension: usize,
    geometry: Geometry,
    _marker: PhantomData<T>,
}

impl<T: Scalar> Metric<T> {
    /// Creates the metric of `geometry` on ℝ^dimension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `dimension == 0`.
    pub fn new(dimension: usize, geometry: Geometry) -> Result<Self> {
        ensure_nonempty(dimension)?;
        Ok(Self {
            dimension,
            geometry,
            _marker: PhantomData,
        })
    }

    /// Ambient dimension.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Geometry this metric belongs to.
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Diagonal entry `i` of the metric.
    #[inline]
    pub fn signature(&self, i: usize) -> T {
        if self.geometry == Geometry::Hyperbolic && i + 1 == self.dimension {
            -T::one()
        } else {
            T::one()
        }
    }

    /// Dense `dimension × dimension` matrix.
    pub fn matrix(&self) -> DMatrix<T> {
        DMatrix::from_fn(self.dimension, self.dimension, |i, j| {
            if i == j {
                self.signature(i)
            } else {
                T::zero()
            }
        })
    }

    /// Computes `M·v`.
    pub fn apply(&self, v: &DVector<T>) -> Result<DVector<T>> {
        self.check_len(v.len())?;
        let mut result = v.clone();
        if self.geometry == Geometry::Hyperbolic {
            let last = self.dimension - 1;
            result[last] = -result[last];
        }
        Ok(result)
    }

    /// Computes `uᵀ M v`.
    pub fn inner(&self, u: &DVector<T>, v: &DVector<T>) -> Result<T> {
        self.check_len(u.len())?;
        self.check_len(v.len())?;
        Ok(column_dot(u, v, self.geometry))
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.dimension {
            return Err(GeometryError::dimension_mismatch(self.dimension, len));
        }
        Ok(())
    }
}

/// Returns the `dimension × dimension` bilinear form of `geometry`.
///
/// # Example
///
/// ```rust
/// use curvopt_core::{geometry::Geometry, metric::get_metric};
///
/// let m = get_metric::<f64>(3, Geometry::Hyperbolic)?;
/// assert_eq!(m[(2, 2)], -1.0);
/// assert_eq!(m[(0, 0)], 1.0);
/// # Ok::<(), curvopt_core::error::GeometryError>(())
/// ```
pub fn get_metric<T: Scalar>(dimension: usize, geometry: Geometry) -> Result<DMatrix<T>> {
    Ok(Metric::<T>::new(dimension, geometry)?.matrix())
}

/// Metric-weighted inner product of two columns with the same storage-agnostic kernel
/// for single vectors and batch columns.
pub(crate) fn column_dot<T, S1, S2>(
    u: &Matrix<T, Dyn, U1, S1>,
    v: &Matrix<T, Dyn, U1, S2>,
    geometry: Geometry,
) -> T
where
    T: Scalar,
    S1: Storage<T, Dyn>,
    S2: Storage<T, Dyn>,
{
    match geometry {
        Geometry::Spherical | Geometry::Euclidean => u.dot(v),
        Geometry::Hyperbolic => {
            let last = u.nrows() - 1;
            u.rows(0, last).dot(&v.rows(0, last)) - u[last] * v[last]
        }
    }
}

/// Inner product `uᵀ M v` of two single vectors.
///
/// # Errors
///
/// `DimensionMismatch` if the lengths differ, `InvalidParameter` if they are empty.
pub fn dot<T: Scalar>(u: &DVector<T>, v: &DVector<T>, geometry: Geometry) -> Result<T> {
    ensure_same_len(u, v)?;
    Ok(column_dot(u, v, geometry))
}

/// Column-wise inner products of two `(d+1) × m` batches.
///
/// # Errors
///
/// `DimensionMismatch` unless both batches have the same shape.
pub fn dot_batch<T: Scalar>(u: &DMatrix<T>, v: &DMatrix<T>, geometry: Geometry) -> Result<DVector<T>> {
    ensure_same_shape(u, v)?;
    Ok(DVector::from_iterator(
        u.ncols(),
        u.column_iter()
            .zip(v.column_iter())
            .map(|(a, b)| column_dot(&a, &b, geometry)),
    ))
}

/// Squared geometry-weighted norm ⟨v,v⟩.
///
/// Negative for time-like vectors under the Lorentz metric.
pub fn squared_norm<T: Scalar>(v: &DVector<T>, geometry: Geometry) -> Result<T> {
    dot(v, v, geometry)
}

/// Geometry-weighted norm `sqrt(⟨v,v⟩)`.
///
/// # Errors
///
/// `DomainError` if ⟨v,v⟩ is negative beyond rounding (a time-like vector).
pub fn norm<T: Scalar>(v: &DVector<T>, geometry: Geometry) -> Result<T> {
    clamped_sqrt(squared_norm(v, geometry)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metric_matrix_shape() {
        let h = get_metric::<f64>(4, Geometry::Hyperbolic).unwrap();
        let mut expected = DMatrix::<f64>::identity(4, 4);
        expected[(3, 3)] = -1.0;
        assert_eq!(h, expected);

        for geometry in [Geometry::Spherical, Geometry::Euclidean] {
            assert_eq!(
                get_metric::<f64>(4, geometry).unwrap(),
                DMatrix::<f64>::identity(4, 4)
            );
        }
    }

    #[test]
    fn test_metric_rejects_zero_dimension() {
        assert!(matches!(
            get_metric::<f64>(0, Geometry::Spherical),
            Err(GeometryError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_dot_matches_dense_metric() {
        let u = DVector::from_vec(vec![0.3, -1.2, 2.0]);
        let v = DVector::from_vec(vec![1.5, 0.4, -0.7]);
        for geometry in Geometry::ALL {
            let m = get_metric::<f64>(3, geometry).unwrap();
            let dense = (u.transpose() * &m * &v)[(0, 0)];
            assert_relative_eq!(dot(&u, &v, geometry).unwrap(), dense, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let u = DVector::from_vec(vec![1.0, 0.0]);
        let v = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        assert!(matches!(
            dot(&u, &v, Geometry::Spherical),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_dot_batch_is_column_wise() {
        let u = DMatrix::from_column_slice(3, 2, &[1.0, 2.0, 3.0, 0.0, 1.0, 2.0]);
        let v = DMatrix::from_column_slice(3, 2, &[1.0, 1.0, 1.0, 2.0, 0.0, 1.0]);
        let result = dot_batch(&u, &v, Geometry::Hyperbolic).unwrap();
        assert_eq!(result.len(), 2);
        assert_relative_eq!(result[0], 1.0 + 2.0 - 3.0);
        assert_relative_eq!(result[1], 0.0 + 0.0 - 2.0);

        let w = DMatrix::<f64>::zeros(3, 3);
        assert!(dot_batch(&u, &w, Geometry::Spherical).is_err());
    }

    #[test]
    fn test_apply_and_inner() {
        let metric = Metric::<f64>::new(3, Geometry::Hyperbolic).unwrap();
        let v = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        assert_eq!(metric.apply(&v).unwrap(), DVector::from_vec(vec![1.0, 2.0, -3.0]));
        assert_relative_eq!(metric.inner(&v, &v).unwrap(), 1.0 + 4.0 - 9.0);
        assert!(metric.apply(&DVector::zeros(2)).is_err());
    }

    #[test]
    fn test_norm_of_timelike_vector_fails() {
        let t = DVector::from_vec(vec![0.0, 0.0, 1.0]);
        assert!(matches!(
            norm(&t, Geometry::Hyperbolic),
            Err(GeometryError::DomainError { .. })
        ));
        assert_relative_eq!(norm(&t, Geometry::Spherical).unwrap(), 1.0);
    }
}
