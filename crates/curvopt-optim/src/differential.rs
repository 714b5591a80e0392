//! Ambient differentials of geodesic distances.
//!
//! The functions here return the gradient of the distance with its index
//! raised by the ambient metric, `M⁻¹ ∇ₑ d`. On the sphere `M` is the identity.
//! On the hyperboloid the Minkowski factor of `∂⟨u,v⟩_L/∂u = M v` cancels
//! against `M⁻¹`, so the raised gradient is a multiple of `v` itself. Feeding
//! this vector to the tangent projection yields the Riemannian gradient, whose
//! negative is a descent direction in every geometry:
//!
//! ```text
//! spherical:   ∇d(u, v) = −v / sqrt(1 − ⟨u,v⟩² + ε)
//! hyperbolic:  ∇d(u, v) = −v / sqrt(⟨u,v⟩_L² − 1 + ε)
//! euclidean:   ∇d(u, v) = (u − v) / ‖u − v‖
//! ```
//!
//! `ε` is [`Scalar::STABILIZER`]. When `⟨u,v⟩` drifts past ±1 by more than `ε`
//! the radicand is floored at `ε` instead of going negative.

use curvopt_core::{
    distance::distance,
    error::{GeometryError, Result},
    geometry::Geometry,
    metric::dot,
    numerical::{ensure_nonempty, ensure_same_len},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;

/// Gradient of `d(u, v)` with respect to `u`.
///
/// Returns the zero vector when `u` and `v` are bitwise equal, where the
/// distance has no gradient.
///
/// # Errors
///
/// `DimensionMismatch` if `u` and `v` differ in length.
pub fn error_differential_eucl<T: Scalar>(
    u: &DVector<T>,
    v: &DVector<T>,
    geometry: Geometry,
) -> Result<DVector<T>> {
    ensure_nonempty(u.len())?;
    ensure_same_len(u, v)?;
    if u == v {
        return Ok(DVector::zeros(u.len()));
    }

    match geometry {
        Geometry::Euclidean => {
            let diff = u - v;
            let n = diff.norm();
            Ok(diff / n)
        }
        _ => {
            let inner = dot(u, v, geometry)?;
            Ok(v * (-T::one() / stabilized_sine(inner, geometry)))
        }
    }
}

/// Gradient at `p_eval` of `Σⱼ d(p_eval, xⱼ)²` over the columns `xⱼ` of `points`.
///
/// Columns bitwise equal to `p_eval` contribute nothing. Terms are summed in
/// column order.
///
/// ```text
/// spherical:   Σ −2 d(p,x) · x / sqrt(1 − ⟨p,x⟩² + ε)
/// hyperbolic:  Σ −2 d(p,x) · x / sqrt(⟨p,x⟩_L² − 1 + ε)
/// euclidean:   Σ  2 (p − x)
/// ```
///
/// After projection onto the tangent space at `p_eval` each curved term equals
/// `−2 log_p(x)`, so a step of `1 / (2m)` along the negative gradient moves to
/// the tangent-space mean of the `m` points.
///
/// # Errors
///
/// - `DimensionMismatch`: if `points` has a row count different from `p_eval.len()`
/// - `DomainError`: if a distance argument leaves its domain
pub fn frechet_diff<T: Scalar>(
    p_eval: &DVector<T>,
    points: &DMatrix<T>,
    geometry: Geometry,
) -> Result<DVector<T>> {
    ensure_nonempty(p_eval.len())?;
    if points.nrows() != p_eval.len() {
        return Err(GeometryError::dimension_mismatch(p_eval.len(), points.nrows()));
    }

    let two = T::one() + T::one();
    let mut total = DVector::zeros(p_eval.len());
    for column in points.column_iter() {
        if column == *p_eval {
            continue;
        }
        let x = column.clone_owned();
        match geometry {
            Geometry::Euclidean => total += (p_eval - &x) * two,
            _ => {
                let d = distance(p_eval, &x, geometry)?;
                let inner = dot(p_eval, &x, geometry)?;
                total += x * (-two * d / stabilized_sine(inner, geometry));
            }
        }
    }
    Ok(total)
}

/// `sqrt(1 − ⟨u,v⟩² + ε)` on the sphere, `sqrt(⟨u,v⟩² − 1 + ε)` on the hyperboloid.
fn stabilized_sine<T: Scalar>(inner: T, geometry: Geometry) -> T {
    let sq = inner * inner;
    let radicand = match geometry {
        Geometry::Hyperbolic => sq - T::one(),
        _ => T::one() - sq,
    } + T::STABILIZER;
    <T as Float>::sqrt(<T as Float>::max(radicand, T::STABILIZER))
}
