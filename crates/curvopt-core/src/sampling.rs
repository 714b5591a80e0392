//! Random points and tangent vectors for tests, benchmarks and initialisation.

use crate::error::Result;
use crate::geometry::Geometry;
use crate::metric::norm;
use crate::numerical::ensure_nonempty;
use crate::tangent::project_to_tangent;
use crate::types::{DVector, Scalar};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

fn gaussian_vector<T: Scalar, R: Rng + ?Sized>(len: usize, rng: &mut R) -> DVector<T> {
    DVector::from_fn(len, |_, _| {
        let val: f64 = StandardNormal.sample(&mut *rng);
        <T as Scalar>::from_f64(val)
    })
}

/// Draws a point of the manifold in ambient dimension `dimension`.
///
/// Sphere points are normalised Gaussian vectors; hyperboloid points take
/// Gaussian spatial coordinates and solve for the time coordinate; Euclidean
/// points are plain Gaussian vectors.
pub fn random_point<T: Scalar, R: Rng + ?Sized>(
    dimension: usize,
    geometry: Geometry,
    rng: &mut R,
) -> Result<DVector<T>> {
    ensure_nonempty(dimension)?;
    let mut point = gaussian_vector::<T, R>(dimension, rng);
    match geometry {
        Geometry::Spherical => {
            let mut n = point.norm();
            while n < <T as Scalar>::from_f64(1e-6) {
                point = gaussian_vector::<T, R>(dimension, rng);
                n = point.norm();
            }
            Ok(point / n)
        }
        Geometry::Hyperbolic => {
            let last = dimension - 1;
            let spatial_sq = point.rows(0, last).norm_squared();
            point[last] = num_traits::Float::sqrt(T::one() + spatial_sq);
            Ok(point)
        }
        Geometry::Euclidean => Ok(point),
    }
}

/// Draws a tangent vector at `point` with geometry-weighted norm `scale`.
pub fn random_tangent<T: Scalar, R: Rng + ?Sized>(
    point: &DVector<T>,
    geometry: Geometry,
    scale: T,
    rng: &mut R,
) -> Result<DVector<T>> {
    ensure_nonempty(point.len())?;
    let w = gaussian_vector::<T, R>(point.len(), rng);
    let tangent = match geometry {
        Geometry::Euclidean => w,
        _ => project_to_tangent(point, &w, geometry)?,
    };
    let n = norm(&tangent, geometry)?;
    if n < T::TANGENT_NORM_TOLERANCE {
        return Ok(tangent);
    }
    Ok(tangent * (scale / n))
}
