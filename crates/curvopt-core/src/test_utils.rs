//! Point constructors shared by the test suites of this workspace.

use crate::types::{DMatrix, DVector, Scalar};
use num_traits::Float;

/// Hyperboloid point with the given spatial coordinates.
pub fn hyperboloid_point<T: Scalar>(spatial: &[T]) -> DVector<T> {
    let spatial_sq = spatial.iter().fold(T::zero(), |acc, x| acc + *x * *x);
    let mut coords = spatial.to_vec();
    coords.push(<T as Float>::sqrt(T::one() + spatial_sq));
    DVector::from_vec(coords)
}

/// Hyperboloid point at distance `t` from the apex `[0, …, 0, 1]` along axis `axis`.
pub fn hyperboloid_geodesic_point<T: Scalar>(dimension: usize, axis: usize, t: T) -> DVector<T> {
    let mut point = DVector::zeros(dimension);
    point[axis] = <T as Float>::sinh(t);
    point[dimension - 1] = <T as Float>::cosh(t);
    point
}

/// Point of the unit circle through the first two axes, at angle `theta` from `e₀`.
pub fn sphere_point<T: Scalar>(dimension: usize, theta: T) -> DVector<T> {
    let mut point = DVector::zeros(dimension);
    point[0] = <T as Float>::cos(theta);
    point[1] = <T as Float>::sin(theta);
    point
}

/// Stacks points as the columns of a batch.
pub fn batch<T: Scalar>(points: &[DVector<T>]) -> DMatrix<T> {
    DMatrix::from_columns(points)
}
