//! Geodesic distance between points already on the manifold.
//!
//! ```text
//! Spherical:  d(u,v) = arccos(⟨u,v⟩)
//! Hyperbolic: d(u,v) = arccosh(−⟨u,v⟩_L)
//! Euclidean:  d(u,v) = sqrt(⟨u−v, u−v⟩)
//! ```
//!
//! Arguments of `arccos`/`arccosh` are clamped into their domain when they
//! drift out by rounding (coincident or antipodal points).

use crate::error::Result;
use crate::geometry::Geometry;
use crate::metric::column_dot;
use crate::numerical::{clamp_acos_argument, clamp_acosh_argument, clamped_sqrt};
use crate::numerical::{ensure_same_len, ensure_same_shape};
use crate::types::{DMatrix, DVector, Scalar};
use nalgebra::{storage::Storage, Dyn, Matrix, U1};
use num_traits::Float;

/// Geodesic distance between two points.
///
/// # Errors
///
/// - `DimensionMismatch`: if the lengths differ
/// - `DomainError`: if the inner product is outside the inverse-trig domain
///   beyond tolerance, i.e. the points are not on the manifold
pub fn distance<T: Scalar>(u: &DVector<T>, v: &DVector<T>, geometry: Geometry) -> Result<T> {
    ensure_same_len(u, v)?;
    column_distance(u, v, geometry)
}

/// Column-wise geodesic distances between two `(d+1) × m` batches.
pub fn distance_batch<T: Scalar>(
    u: &DMatrix<T>,
    v: &DMatrix<T>,
    geometry: Geometry,
) -> Result<DVector<T>> {
    ensure_same_shape(u, v)?;
    let mut result = DVector::zeros(u.ncols());
    for (j, (uj, vj)) in u.column_iter().zip(v.column_iter()).enumerate() {
        result[j] = column_distance(&uj, &vj, geometry)?;
    }
    Ok(result)
}

pub(crate) fn column_distance<T, S1, S2>(
    u: &Matrix<T, Dyn, U1, S1>,
    v: &Matrix<T, Dyn, U1, S2>,
    geometry: Geometry,
) -> Result<T>
where
    T: Scalar,
    S1: Storage<T, Dyn>,
    S2: Storage<T, Dyn>,
{
    match geometry {
        Geometry::Spherical => {
            let cos_theta = clamp_acos_argument(column_dot(u, v, geometry))?;
            Ok(<T as Float>::acos(cos_theta))
        }
        Geometry::Hyperbolic => {
            let cosh_d = clamp_acosh_argument(-column_dot(u, v, geometry))?;
            Ok(<T as Float>::acosh(cosh_d))
        }
        Geometry::Euclidean => {
            let diff = u - v;
            clamped_sqrt(column_dot(&diff, &diff, geometry))
        }
    }
}
