//! Exponential maps of the three geometries.
//!
//! # Mathematical Formula
//!
//! With `n = sqrt(⟨v,v⟩)` the geometry-weighted norm of `v ∈ T_p`:
//!
//! ```text
//! Spherical:  exp_p(v) = cos(n) p + (sin(n)/n) v
//! Hyperbolic: exp_p(v) = cosh(n) p + (sinh(n)/n) v
//! Euclidean:  exp_p(v) = p + v
//! ```
//!
//! For `n` below `T::TANGENT_NORM_TOLERANCE` the curved maps return `p`
//! unchanged, which is the limit of both formulas as `n → 0`.

use crate::error::Result;
use crate::geometry::Geometry;
use crate::metric::column_dot;
use crate::numerical::{clamped_sqrt, ensure_same_len, ensure_same_shape};
use crate::types::{DMatrix, DVector, Scalar};
use nalgebra::{storage::Storage, Dyn, Matrix, U1};
use num_traits::Float;

/// Maps the tangent vector `v` at `p` onto the manifold.
///
/// # Errors
///
/// - `DimensionMismatch`: if `v` and `p` differ in length
/// - `DomainError`: if ⟨v,v⟩ is negative beyond rounding, i.e. `v` is time-like
///   and cannot be tangent to the hyperboloid
///
/// # Example
///
/// ```rust
/// use curvopt_core::{exponential::exponential_map, geometry::Geometry};
/// use nalgebra::DVector;
///
/// let p = DVector::from_vec(vec![0.0, 0.0, 1.0]);
/// let v = DVector::from_vec(vec![std::f64::consts::FRAC_PI_2, 0.0, 0.0]);
/// let q = exponential_map(&v, &p, Geometry::Spherical)?;
/// assert!((q[0] - 1.0).abs() < 1e-12);
/// # Ok::<(), curvopt_core::error::GeometryError>(())
/// ```
pub fn exponential_map<T: Scalar>(v: &DVector<T>, p: &DVector<T>, geometry: Geometry) -> Result<DVector<T>> {
    ensure_same_len(v, p)?;
    column_exponential(v, p, geometry)
}

/// Column-wise exponential map: column `j` of `v` is tangent at column `j` of `p`.
pub fn exponential_map_batch<T: Scalar>(
    v: &DMatrix<T>,
    p: &DMatrix<T>,
    geometry: Geometry,
) -> Result<DMatrix<T>> {
    ensure_same_shape(v, p)?;
    let mut result = p.clone();
    for (j, (vj, pj)) in v.column_iter().zip(p.column_iter()).enumerate() {
        result.set_column(j, &column_exponential(&vj, &pj, geometry)?);
    }
    Ok(result)
}

fn column_exponential<T, S1, S2>(
    v: &Matrix<T, Dyn, U1, S1>,
    p: &Matrix<T, Dyn, U1, S2>,
    geometry: Geometry,
) -> Result<DVector<T>>
where
    T: Scalar,
    S1: Storage<T, Dyn>,
    S2: Storage<T, Dyn>,
{
    if geometry == Geometry::Euclidean {
        return Ok(p + v);
    }

    let n = clamped_sqrt(column_dot(v, v, geometry))?;
    if n < T::TANGENT_NORM_TOLERANCE {
        return Ok(p.clone_owned());
    }

    let (along_point, along_tangent) = match geometry {
        Geometry::Spherical => (<T as Float>::cos(n), <T as Float>::sin(n) / n),
        Geometry::Hyperbolic => (<T as Float>::cosh(n), <T as Float>::sinh(n) / n),
        Geometry::Euclidean => (T::one(), T::one()),
    };
    Ok(p * along_point + v * along_tangent)
}
