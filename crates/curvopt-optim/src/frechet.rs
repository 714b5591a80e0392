//! Karcher (Fréchet) mean by Riemannian gradient descent.
//!
//! Minimises `F(p) = Σⱼ d(p, xⱼ)²` with [`frechet_diff`] as the differential.
//! With the default constant step `1 / (2m)` each iteration moves to the
//! tangent-space average of the logarithms of the `m` points, which is the
//! classical Karcher fixed-point iteration.

use crate::differential::frechet_diff;
use crate::driver::{DescentConfig, DescentResult, RiemannianDescent};
use curvopt_core::{
    error::{GeometryError, OptimizerResult},
    geometry::Geometry,
    numerical::check_point,
    types::{DMatrix, DVector, Scalar},
};

/// Default configuration for a batch of `count` points.
pub fn default_karcher_config<T: Scalar>(count: usize) -> DescentConfig<T> {
    let two_m = <T as Scalar>::from_usize(2 * count.max(1));
    DescentConfig::default().with_constant_step_size(T::one() / two_m)
}

/// Karcher mean of the columns of `points`, starting from the first column.
///
/// # Errors
///
/// - `InvalidParameter`: if the batch has no columns
/// - `DomainError`: if a column is not on the manifold
pub fn karcher_mean<T: Scalar>(
    points: &DMatrix<T>,
    geometry: Geometry,
) -> OptimizerResult<DescentResult<T>> {
    karcher_mean_with(points, geometry, &default_karcher_config(points.ncols()), None)
}

/// Karcher mean with an explicit configuration and optional starting point.
pub fn karcher_mean_with<T: Scalar>(
    points: &DMatrix<T>,
    geometry: Geometry,
    config: &DescentConfig<T>,
    start: Option<&DVector<T>>,
) -> OptimizerResult<DescentResult<T>> {
    if points.ncols() == 0 || points.nrows() == 0 {
        return Err(GeometryError::invalid_parameter("Karcher mean of an empty batch").into());
    }
    for column in points.column_iter() {
        check_point(&column.clone_owned(), geometry)?;
    }

    let start = match start {
        Some(p) => {
            check_point(p, geometry)?;
            p.clone()
        }
        None => points.column(0).clone_owned(),
    };

    RiemannianDescent::new(config.clone()).run(&start, points, frechet_diff, geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curvopt_core::error::OptimizerError;
    use curvopt_core::test_utils::{batch, sphere_point};

    #[test]
    fn test_default_step_size() {
        let config = default_karcher_config::<f64>(4);
        assert_eq!(config.schedule.step_size(0), 0.125);
    }

    #[test]
    fn test_euclidean_mean_is_arithmetic_mean() {
        let points = batch(&[
            DVector::from_vec(vec![0.0, 0.0]),
            DVector::from_vec(vec![2.0, 0.0]),
            DVector::from_vec(vec![1.0, 3.0]),
        ]);
        let result = karcher_mean(&points, Geometry::Euclidean).unwrap();
        assert!(result.converged());
        assert_relative_eq!(result.point, DVector::from_vec(vec![1.0, 1.0]), epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_mean_of_arc_endpoints() {
        let points = batch(&[sphere_point::<f64>(3, -0.4), sphere_point(3, 0.4)]);
        let result = karcher_mean(&points, Geometry::Spherical).unwrap();
        assert_relative_eq!(result.point, sphere_point(3, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_empty_and_off_manifold_batches() {
        let empty = DMatrix::<f64>::zeros(3, 0);
        assert!(matches!(
            karcher_mean(&empty, Geometry::Spherical),
            Err(OptimizerError::Geometry(GeometryError::InvalidParameter { .. }))
        ));
        let off = batch(&[DVector::from_vec(vec![2.0, 0.0, 0.0])]);
        assert!(matches!(
            karcher_mean(&off, Geometry::Spherical),
            Err(OptimizerError::Geometry(GeometryError::DomainError { .. }))
        ));
    }
}
