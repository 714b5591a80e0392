//! Closed-form Einstein midpoint of hyperboloid points.
//!
//! ```text
//! k_i   = x_i / x_i,last
//! γ_i   = 1 / sqrt(1 − ‖k_i,spatial‖²)
//! k_mid = Σ γ_i k_i / Σ γ_i
//! m     = γ(k_mid) · k_mid
//! ```
//!
//! Sums run over the columns in order, so the result is deterministic for a
//! given column ordering.

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::klein::{from_klein, lorentz_factor, project_to_klein};
use crate::numerical::ensure_nonempty;
use crate::types::{DMatrix, DVector, Scalar};

/// Einstein midpoint of the columns of `points` on the hyperboloid.
///
/// # Errors
///
/// - `InvalidParameter`: if the batch has no columns
/// - `DomainError`: if a column has a non-positive last coordinate or its Klein
///   image lies outside the open unit ball
///
/// # Example
///
/// ```rust
/// use curvopt_core::aggregation::einstein_midpoint;
/// use nalgebra::DMatrix;
///
/// let a = [0.0, 0.0, 1.0];
/// let b = [1.0_f64.sinh(), 0.0, 1.0_f64.cosh()];
/// let points = DMatrix::from_column_slice(3, 2, &[a, b].concat());
/// let m = einstein_midpoint(&points)?;
/// assert!((m[0] - 0.5_f64.sinh()).abs() < 1e-12);
/// # Ok::<(), curvopt_core::error::GeometryError>(())
/// ```
pub fn einstein_midpoint<T: Scalar>(points: &DMatrix<T>) -> Result<DVector<T>> {
    let weights = DVector::from_element(points.ncols(), T::one());
    weighted_einstein_midpoint(points, &weights)
}

/// Einstein midpoint with an explicit geometry tag.
///
/// # Errors
///
/// `UnsupportedOperation` unless `geometry` is hyperbolic.
pub fn einstein_midpoint_in<T: Scalar>(points: &DMatrix<T>, geometry: Geometry) -> Result<DVector<T>> {
    if geometry != Geometry::Hyperbolic {
        return Err(GeometryError::unsupported("Einstein midpoint", geometry));
    }
    einstein_midpoint(points)
}

/// Einstein midpoint where each Lorentz factor is scaled by a non-negative weight.
///
/// # Errors
///
/// - `DimensionMismatch`: if `weights.len()` differs from the number of columns
/// - `InvalidParameter`: if a weight is negative or the weights sum to zero
pub fn weighted_einstein_midpoint<T: Scalar>(
    points: &DMatrix<T>,
    weights: &DVector<T>,
) -> Result<DVector<T>> {
    ensure_nonempty(points.nrows())?;
    if points.ncols() == 0 {
        return Err(GeometryError::invalid_parameter(
            "Einstein midpoint of an empty batch",
        ));
    }
    if weights.len() != points.ncols() {
        return Err(GeometryError::dimension_mismatch(points.ncols(), weights.len()));
    }
    if weights.iter().any(|w| *w < T::zero()) {
        return Err(GeometryError::invalid_parameter("weights must be non-negative"));
    }

    let klein = project_to_klein(points)?;
    let mut weighted_sum = DVector::zeros(points.nrows());
    let mut total = T::zero();
    for (column, weight) in klein.column_iter().zip(weights.iter()) {
        let gamma = lorentz_factor(&column)? * *weight;
        weighted_sum += column * gamma;
        total += gamma;
    }
    if total <= T::zero() {
        return Err(GeometryError::invalid_parameter("weights sum to zero"));
    }

    from_klein(&(weighted_sum / total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance;
    use crate::metric::dot;
    use approx::assert_relative_eq;

    fn two_points() -> DMatrix<f64> {
        DMatrix::from_column_slice(
            3,
            2,
            &[0.0, 0.0, 1.0, 1.0_f64.sinh(), 0.0, 1.0_f64.cosh()],
        )
    }

    #[test]
    fn test_midpoint_of_two_points_is_geodesic_midpoint() {
        let m = einstein_midpoint(&two_points()).unwrap();
        assert_relative_eq!(dot(&m, &m, Geometry::Hyperbolic).unwrap(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(
            m,
            DVector::from_vec(vec![0.5_f64.sinh(), 0.0, 0.5_f64.cosh()]),
            epsilon = 1e-12
        );
        let a = two_points().column(0).clone_owned();
        assert_relative_eq!(distance(&a, &m, Geometry::Hyperbolic).unwrap(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_single_point_is_fixed() {
        let x = DMatrix::from_column_slice(3, 1, &[0.3, 0.4, (1.0_f64 + 0.25).sqrt()]);
        let m = einstein_midpoint(&x).unwrap();
        assert_relative_eq!(m, x.column(0).clone_owned(), epsilon = 1e-12);
    }

    #[test]
    fn test_weights_select_a_point() {
        let weights = DVector::from_vec(vec![0.0, 1.0]);
        let m = weighted_einstein_midpoint(&two_points(), &weights).unwrap();
        assert_relative_eq!(m, two_points().column(1).clone_owned(), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        let empty = DMatrix::<f64>::zeros(3, 0);
        assert!(matches!(
            einstein_midpoint(&empty),
            Err(GeometryError::InvalidParameter { .. })
        ));
        assert!(matches!(
            einstein_midpoint_in(&two_points(), Geometry::Spherical),
            Err(GeometryError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            weighted_einstein_midpoint(&two_points(), &DVector::from_vec(vec![1.0])),
            Err(GeometryError::DimensionMismatch { .. })
        ));
        // Spatial norm 2 > time coordinate 1: Klein image outside the ball.
        let outside = DMatrix::from_column_slice(3, 1, &[2.0, 0.0, 1.0]);
        assert!(matches!(
            einstein_midpoint(&outside),
            Err(GeometryError::DomainError { .. })
        ));
    }
}
